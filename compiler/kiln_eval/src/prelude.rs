//! Default host functions.
//!
//! | Global | Behavior |
//! |---|---|
//! | `true`, `false` | `Bool` constants |
//! | `print` | writes the display forms of its arguments, concatenated |
//! | `println` | as `print`, then a newline |
//! | `str` | concatenated display forms, as a `String` |
//! | `+`, `*` | fold over any number of arguments (`0` / `1` when empty) |
//! | `-` | negates one argument, otherwise folds left |
//! | `/`, `%`, `**` | exactly two arguments |
//!
//! Everything here is an ordinary native global; a host can leave the
//! prelude out and install its own set through the same
//! [`Environment::define_global`] call.

use kiln_ir::Name;
use kiln_patterns::errors::arity_mismatch;
use kiln_patterns::{EvalError, EvalResult, NativeFunction, Value};

use crate::operators::{evaluate_binary, negate, BinaryOp};
use crate::{Environment, SharedPrintHandler};

/// Define every prelude global in `env`.
///
/// Fails with `AlreadyDefined` if one of the names is already taken.
pub fn install(env: &mut Environment, print_handler: &SharedPrintHandler) -> Result<(), EvalError> {
    env.define_global(Name::new("true"), Value::Bool(true))?;
    env.define_global(Name::new("false"), Value::Bool(false))?;

    for native in natives(print_handler) {
        env.define_global(native.name().clone(), Value::Native(native))?;
    }

    tracing::debug!("prelude installed");
    Ok(())
}

/// The prelude's native functions, writing through `print_handler`.
pub fn natives(print_handler: &SharedPrintHandler) -> Vec<NativeFunction> {
    let print_out = print_handler.clone();
    let println_out = print_handler.clone();

    vec![
        NativeFunction::new("print", move |args: &[Value]| {
            print_out.print(&concat(args));
            Ok(Value::Nil)
        }),
        NativeFunction::new("println", move |args: &[Value]| {
            println_out.println(&concat(args));
            Ok(Value::Nil)
        }),
        NativeFunction::new("str", |args: &[Value]| Ok(Value::string(concat(args)))),
        NativeFunction::new("+", |args: &[Value]| fold(args, Value::int(0), BinaryOp::Add)),
        NativeFunction::new("*", |args: &[Value]| fold(args, Value::int(1), BinaryOp::Mul)),
        NativeFunction::new("-", subtract),
        NativeFunction::new("/", |args: &[Value]| binary(args, BinaryOp::Div)),
        NativeFunction::new("%", |args: &[Value]| binary(args, BinaryOp::Rem)),
        NativeFunction::new("**", |args: &[Value]| binary(args, BinaryOp::Pow)),
    ]
}

fn concat(args: &[Value]) -> String {
    args.iter().map(Value::display_value).collect()
}

fn fold(args: &[Value], identity: Value, op: BinaryOp) -> EvalResult {
    let Some((first, rest)) = args.split_first() else {
        return Ok(identity);
    };
    rest.iter()
        .try_fold(first.clone(), |acc, value| evaluate_binary(&acc, value, op))
}

fn subtract(args: &[Value]) -> EvalResult {
    match args {
        [] => Err(arity_mismatch("-", 1, 0)),
        [only] => negate(only),
        [first, rest @ ..] => rest.iter().try_fold(first.clone(), |acc, value| {
            evaluate_binary(&acc, value, BinaryOp::Sub)
        }),
    }
}

fn binary(args: &[Value], op: BinaryOp) -> EvalResult {
    match args {
        [left, right] => evaluate_binary(left, right, op),
        _ => Err(arity_mismatch(op.symbol(), 2, args.len())),
    }
}
