//! Calls: plain values, overload sets and named calls.

use kiln_ir::{Name, NamedCall};
use kiln_patterns::errors::{arity_mismatch, not_callable, stack_overflow};
use kiln_patterns::{Callable, EvalError, EvalResult, FunctionValue, Value};
use rustc_hash::FxHashMap;

use super::Evaluator;
use crate::Environment;

impl Evaluator {
    /// Call any value: overload sets dispatch, natives run directly,
    /// everything else is `NotCallable`.
    pub fn call_value(&mut self, env: &Environment, callee: &Value, args: &[Value]) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(env, func, args),
            Value::Native(native) => native.call(args),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Run the first overload of `func` that accepts `args`.
    ///
    /// A user implementation runs in a new frame over `env`'s globals whose
    /// locals are the implementation's captures overlaid with the pattern
    /// bindings. A native implementation receives `args` as given.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = %func.name(), args = args.len())
    )]
    pub fn call_function(
        &mut self,
        env: &Environment,
        func: &FunctionValue,
        args: &[Value],
    ) -> EvalResult {
        let (callable, bindings) = func.resolve(args)?;
        match callable {
            Callable::Native(native) => native.call(args),
            Callable::User(user) => {
                self.enter_call()?;
                let mut locals: FxHashMap<Name, Value> = user
                    .captures()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect();
                locals.extend(bindings);

                let mut frame = env.new_scope_from(locals);
                let result = self.eval(&mut frame, user.body());
                self.depth -= 1;
                result
            }
        }
    }

    /// `(name args...)`.
    ///
    /// With an instance as the first argument, `name` is tried as a field
    /// (which takes no further arguments) and then as a method (which gets
    /// the arguments unchanged, receiver first). Otherwise, or if neither
    /// exists, `name` is looked up as a variable and called.
    pub(super) fn eval_named_call(&mut self, env: &mut Environment, call: &NamedCall) -> EvalResult {
        let args = self.eval_list(env, &call.args)?;
        let name = call.function.as_str();

        if let Some(Value::Instance(receiver)) = args.first() {
            if receiver.has_field(name) {
                if args.len() != 1 {
                    return Err(arity_mismatch(name, 1, args.len()));
                }
                return receiver.get(name);
            }
            if let Some(method) = receiver.info().method(name) {
                return self.call_function(env, method, &args);
            }
        }

        let callee = env.get(name)?;
        self.call_value(env, &callee, &args)
    }

    fn enter_call(&mut self) -> Result<(), EvalError> {
        if let Some(limit) = self.max_call_depth {
            if self.depth >= limit {
                tracing::warn!(
                    limit,
                    remaining_stack = ?kiln_stack::remaining_stack(),
                    "call depth limit reached"
                );
                return Err(stack_overflow(limit));
            }
        }
        self.depth += 1;
        Ok(())
    }
}
