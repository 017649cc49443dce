//! Kiln Eval - tree-walking evaluator for Kiln programs.
//!
//! # Architecture
//!
//! - `Environment`: shared globals plus one private local frame, with
//!   RAII-restored `let` bindings
//! - `Evaluator`: the recursive walk over `kiln_ir::Expr`, including
//!   overload dispatch and named-call resolution
//! - `Interpreter` / `InterpreterBuilder`: embedding facade that owns an
//!   environment, installs host functions and evaluates top-level forms
//! - `prelude`: the default host functions (`print`, `str`, arithmetic)
//!
//! Values, patterns and errors live in `kiln_patterns` and are re-exported
//! here for convenience.

mod environment;
pub mod interpreter;
mod operators;
pub mod prelude;
mod print_handler;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

use std::sync::Once;

pub use kiln_patterns::{
    Argument, ArgumentsPattern, Bindings, Callable, ClassInfo, ClassInstance, EvalError,
    EvalErrorKind, EvalResult, FunctionValue, NativeFunction, Pattern, UserFunction, Value,
};

pub use environment::{Environment, LetGuard, LocalScope};
pub use interpreter::{Evaluator, Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, BinaryOp};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for the evaluator's spans and events.
///
/// The interpreter never calls this itself: embedders call it once at
/// startup. Does nothing unless `RUST_LOG` is set, and only the first call
/// has any effect. A subscriber the host installed earlier is left in place
/// and receives the evaluator's events instead. Useful levels:
///
/// ```text
/// RUST_LOG=kiln_eval=debug           # definitions and function calls
/// RUST_LOG=kiln_patterns=trace       # every rejected overload
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            if let Err(err) = installed {
                tracing::debug!(%err, "keeping the existing tracing subscriber");
            }
        }
    });
}
