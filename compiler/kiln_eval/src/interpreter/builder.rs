//! `InterpreterBuilder` for configuring an [`Interpreter`].

use kiln_patterns::{EvalError, NativeFunction, Value};

use super::{Evaluator, Interpreter};
use crate::{prelude, stdout_handler, Environment, SharedPrintHandler};

/// Builder for [`Interpreter`].
///
/// Defaults: stdout output, prelude installed, unlimited call depth.
///
/// ```text
/// let mut interp = InterpreterBuilder::new()
///     .print_handler(buffer_handler())
///     .max_call_depth(10_000)
///     .native(NativeFunction::new("now", |_| Ok(Value::int(0))))
///     .build()?;
/// ```
pub struct InterpreterBuilder {
    env: Option<Environment>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
    prelude: bool,
    natives: Vec<NativeFunction>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            env: None,
            print_handler: None,
            max_call_depth: None,
            prelude: true,
            natives: Vec::new(),
        }
    }

    /// Start from an existing environment instead of an empty one.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Where `print` and `println` write. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Fail with `StackOverflow` once this many user calls are active.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Whether to install the [`prelude`] globals.
    #[must_use]
    pub fn prelude(mut self, enabled: bool) -> Self {
        self.prelude = enabled;
        self
    }

    /// An extra host function, installed after the prelude.
    #[must_use]
    pub fn native(mut self, native: NativeFunction) -> Self {
        self.natives.push(native);
        self
    }

    /// Build the interpreter.
    ///
    /// Fails with `AlreadyDefined` if a host function reuses a taken name.
    pub fn build(self) -> Result<Interpreter, EvalError> {
        let print_handler = self.print_handler.unwrap_or_else(stdout_handler);
        let mut env = self.env.unwrap_or_default();

        if self.prelude {
            prelude::install(&mut env, &print_handler)?;
        }
        for native in self.natives {
            env.define_global(native.name().clone(), Value::Native(native))?;
        }

        Ok(Interpreter {
            env,
            evaluator: Evaluator::new(self.max_call_depth),
            print_handler,
        })
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
