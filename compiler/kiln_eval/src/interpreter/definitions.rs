//! Class, function and lambda definitions.

use kiln_ir::{ClassDef, FunctionDef, Lambda};
use kiln_patterns::errors::already_defined;
use kiln_patterns::{
    Callable, ClassInfo, EvalResult, FunctionValue, Pattern, UserFunction, Value,
};

use crate::Environment;

/// Name under which lambdas appear in traces.
const LAMBDA_NAME: &str = "lambda";

/// Register the class's constructor as a global under the class name.
pub(super) fn define_class(env: &mut Environment, def: &ClassDef) -> EvalResult {
    let info = ClassInfo::new(def.name.clone(), &def.fields, &def.methods)?;
    env.define_global(def.name.clone(), Value::Native(ClassInfo::constructor(&info)))?;
    tracing::debug!(
        class = %def.name,
        fields = def.fields.len(),
        methods = def.methods.len(),
        "class defined"
    );
    Ok(Value::Nil)
}

/// Add an untyped overload to the global function `def.name`, creating the
/// function on first definition.
pub(super) fn define_function(env: &mut Environment, def: &FunctionDef) -> EvalResult {
    let implementation = Callable::User(UserFunction::new(def.params.clone(), def.body.clone())?);
    let pattern = Pattern::untyped(def.params.clone());

    match env.global(def.name.as_str()) {
        Some(Value::Function(existing)) => {
            existing.define(pattern, implementation);
            tracing::debug!(
                function = %def.name,
                overloads = existing.len(),
                "overload added"
            );
        }
        Some(_) => return Err(already_defined(def.name.as_str())),
        None => {
            let function = FunctionValue::with_overload(def.name.clone(), pattern, implementation);
            env.define_global(def.name.clone(), Value::Function(function))?;
            tracing::debug!(function = %def.name, "function defined");
        }
    }
    Ok(Value::Nil)
}

/// A single-overload function that closes over the current local frame.
pub(super) fn make_lambda(env: &Environment, lambda: &Lambda) -> EvalResult {
    let implementation = UserFunction::new(lambda.params.clone(), lambda.body.clone())?
        .with_captures(env.capture());
    Ok(Value::Function(FunctionValue::with_overload(
        LAMBDA_NAME,
        Pattern::untyped(lambda.params.clone()),
        Callable::User(implementation),
    )))
}
