//! Kiln Patterns - runtime values and the overload resolver.
//!
//! This crate holds everything the evaluator manipulates at runtime:
//! - `Value` and its heap-backed variants
//! - `ClassInfo` / `ClassInstance`: slot-indexed class layouts
//! - `Pattern`, `ArgumentsPattern`, `Argument`: argument-list patterns
//! - `FunctionValue`: ordered overload sets resolved first-match-wins
//! - `EvalError` / `EvalErrorKind` and their factory functions
//!
//! Evaluating a selected implementation's body is the evaluator's job
//! (`kiln_eval`); [`FunctionValue::resolve`] stops at "which implementation,
//! with which bindings".

pub mod errors;
pub mod pattern;
mod value;

pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use pattern::{Argument, ArgumentsPattern, Bindings, FullUntyped, Pattern};
pub use value::{
    Callable, ClassInfo, ClassInstance, FunctionValue, Heap, NativeFn, NativeFunction, Overload,
    SharedClassInfo, UserFunction, Value,
};
