//! End-to-end tests: hand-built syntax trees through `Interpreter`.

mod operators_tests;

use kiln_ir::Expr;

use crate::{buffer_handler, EvalErrorKind, EvalResult, Interpreter, SharedPrintHandler};

/// Interpreter with the prelude whose output is captured.
fn interpreter() -> (Interpreter, SharedPrintHandler) {
    let out = buffer_handler();
    let interp = Interpreter::builder()
        .print_handler(out.clone())
        .build()
        .unwrap();
    (interp, out)
}

fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::named_call(name, args)
}

fn int(n: i64) -> Expr {
    Expr::Int(n)
}

fn ident(name: &str) -> Expr {
    Expr::ident(name)
}

fn error_kind(result: EvalResult) -> EvalErrorKind {
    result.unwrap_err().kind
}
