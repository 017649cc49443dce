//! Host-provided callables.

use std::fmt;
use std::sync::Arc;

use kiln_ir::Name;

use super::Value;
use crate::EvalResult;

/// Signature of a host function: ordered arguments in, value or failure out.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult + Send + Sync;

/// A named host function.
///
/// The evaluator imposes no arity contract; the function validates its own
/// arguments.
#[derive(Clone)]
pub struct NativeFunction {
    name: Name,
    func: Arc<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<Name>,
        func: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        NativeFunction {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.func)(args)
    }

    /// Identity comparison.
    pub fn same_function(&self, other: &NativeFunction) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
