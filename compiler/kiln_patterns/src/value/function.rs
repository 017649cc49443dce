//! Overload sets.
//!
//! A Kiln function is not a single body but an ordered list of
//! `(pattern, implementation)` pairs. Every `(fun name ...)` for an existing
//! name appends another pair; calls pick the first pair whose pattern
//! accepts the arguments.
//!
//! ```text
//! (fun fact (0) 1)           // Constant(0)
//! (fun fact (n) (* n ...))   // Variable(n)
//! ```
//!
//! Registration order is observable: a broad pattern registered first
//! shadows every narrower one registered after it. There is no
//! specificity ranking.

use std::fmt;

use kiln_ir::{Name, SharedExpr};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{Heap, NativeFunction, Value};
use crate::errors::{duplicate_argument, no_matching_overload};
use crate::pattern::{Bindings, Pattern};
use crate::EvalError;

/// User-written implementation: parameters and a body.
///
/// Named functions and methods capture nothing; their body sees the
/// call-time environment (globals plus the pattern bindings). Lambdas
/// capture the local frame they were created in.
#[derive(Clone)]
pub struct UserFunction {
    params: Vec<Name>,
    body: SharedExpr,
    captures: Heap<FxHashMap<Name, Value>>,
}

impl UserFunction {
    /// Fails if a parameter name repeats.
    pub fn new(params: Vec<Name>, body: SharedExpr) -> Result<Self, EvalError> {
        let mut seen = FxHashSet::default();
        for param in &params {
            if !seen.insert(param) {
                return Err(duplicate_argument(param.as_str()));
            }
        }
        Ok(UserFunction {
            params,
            body,
            captures: Heap::new(FxHashMap::default()),
        })
    }

    /// Attach the bindings visible where a lambda was created.
    #[must_use]
    pub fn with_captures(mut self, captures: FxHashMap<Name, Value>) -> Self {
        self.captures = Heap::new(captures);
        self
    }

    pub fn params(&self) -> &[Name] {
        &self.params
    }

    pub fn body(&self) -> &SharedExpr {
        &self.body
    }

    pub fn captures(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.captures.iter()
    }

    pub fn has_captures(&self) -> bool {
        !self.captures.is_empty()
    }
}

/// What runs once a pattern matched.
#[derive(Clone)]
pub enum Callable {
    User(UserFunction),
    /// Receives the raw argument list; pattern bindings are not passed.
    Native(NativeFunction),
}

/// One `(pattern, implementation)` entry.
#[derive(Clone)]
pub struct Overload {
    pub pattern: Pattern,
    pub callable: Callable,
}

/// Ordered, append-only overload set.
///
/// Clones share the list, so an overload defined through one reference is
/// visible to every holder. The lock is held only while the list is scanned,
/// never while an implementation runs.
#[derive(Clone)]
pub struct FunctionValue {
    name: Name,
    overloads: Heap<RwLock<Vec<Overload>>>,
}

impl FunctionValue {
    /// An overload set with no entries yet.
    pub fn new(name: impl Into<Name>) -> Self {
        FunctionValue {
            name: name.into(),
            overloads: Heap::new(RwLock::new(Vec::new())),
        }
    }

    /// An overload set with a single entry.
    pub fn with_overload(name: impl Into<Name>, pattern: Pattern, callable: Callable) -> Self {
        let function = FunctionValue::new(name);
        function.define(pattern, callable);
        function
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Append an overload. Earlier entries keep priority.
    pub fn define(&self, pattern: Pattern, callable: Callable) {
        self.overloads.write().push(Overload { pattern, callable });
    }

    pub fn len(&self) -> usize {
        self.overloads.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.overloads.read().is_empty()
    }

    /// Pick the implementation for `args`.
    ///
    /// Tries every overload in registration order and returns the first
    /// match with its bindings. Individual rejections are only traced; the
    /// caller sees a single `NoMatchingOverload`.
    pub fn resolve(&self, args: &[Value]) -> Result<(Callable, Bindings), EvalError> {
        let overloads = self.overloads.read();
        for (index, overload) in overloads.iter().enumerate() {
            match overload.pattern.matches(args) {
                Ok(bindings) => return Ok((overload.callable.clone(), bindings)),
                Err(err) => {
                    tracing::trace!(
                        function = %self.name,
                        overload = index,
                        reason = %err,
                        "overload rejected"
                    );
                }
            }
        }
        Err(no_matching_overload(self.name.as_str(), args))
    }

    /// Identity comparison.
    pub fn same_function(&self, other: &FunctionValue) -> bool {
        Heap::ptr_eq(&self.overloads, &other.overloads)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("overloads", &self.len())
            .finish()
    }
}
