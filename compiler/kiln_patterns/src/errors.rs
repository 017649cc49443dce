//! Error types for evaluation and pattern matching.
//!
//! Every failure the runtime can produce is an [`EvalError`]: a structured
//! [`EvalErrorKind`] plus the rendered message. Construct errors through the
//! factory functions in this module (`undefined_variable(name)`, ...) so the
//! kind and message always agree.

use crate::value::Value;
use kiln_ir::Name;

/// Result of evaluating an expression or calling a function.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
///
/// The `Display` impl is the user-facing message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Environment
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("{name} already defined")]
    AlreadyDefined { name: String },

    // Definitions
    #[error("attempting to define multiple arguments as {name}")]
    DuplicateArgument { name: String },
    #[error("class {class} has multiple fields with identifier {field}")]
    DuplicateField { class: String, field: String },
    #[error("{name} can't be both a field and a method on class {class}")]
    FieldMethodCollision { class: String, name: String },

    // Classes
    #[error("{}", arity_message(name, *expected, *got))]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("no field {field} on class {class}")]
    NoSuchField { class: String, field: String },
    #[error("no method {method} on class {class}")]
    NoSuchMethod { class: String, method: String },

    // Calls
    #[error("value of type {type_name} is not callable")]
    NotCallable { type_name: String },
    #[error("no overload of {name} matches arguments ({})", arg_types.join(" "))]
    NoMatchingOverload { name: String, arg_types: Vec<String> },
    #[error("maximum call depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },

    // Patterns
    #[error("missing arguments {}", missing.join(", "))]
    MissingArguments { missing: Vec<String> },
    #[error("not enough arguments: expected at least {expected}, got {got}")]
    NotEnoughArguments { expected: usize, got: usize },
    #[error("{got} does not match {expected}")]
    ConstantMismatch { expected: String, got: String },
    #[error("wrong type. expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("expected Array, got {got}")]
    ExpectedArray { got: String },

    // Evaluator
    #[error("unknown expression encountered: {kind}")]
    UnknownExpression { kind: String },

    // Host built-ins
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },
    #[error("{operation} cannot be applied to {type_name}")]
    InvalidOperand {
        operation: String,
        type_name: String,
    },

    /// Errors raised by host functions that fit no other category.
    #[error("{message}")]
    Custom { message: String },
}

fn arity_message(name: &str, expected: usize, got: usize) -> String {
    let noun = if expected == 1 { "argument" } else { "arguments" };
    format!("{name} expects {expected} {noun}, got {got}")
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    /// Structured category, for matching on the failure mode.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    /// Create an uncategorised error with a message.
    ///
    /// Host functions use this for their own failure modes.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

// Environment Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn already_defined(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AlreadyDefined {
        name: name.to_string(),
    })
}

// Definition Errors

#[cold]
pub fn duplicate_argument(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateArgument {
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_field(class: &str, field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateField {
        class: class.to_string(),
        field: field.to_string(),
    })
}

#[cold]
pub fn field_method_collision(class: &str, name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FieldMethodCollision {
        class: class.to_string(),
        name: name.to_string(),
    })
}

// Class Errors

/// Wrong number of arguments to a constructor or field accessor.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn no_such_field(class: &str, field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchField {
        class: class.to_string(),
        field: field.to_string(),
    })
}

#[cold]
pub fn no_such_method(class: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchMethod {
        class: class.to_string(),
        method: method.to_string(),
    })
}

// Call Errors

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

/// No overload of `name` accepted `args`.
#[cold]
pub fn no_matching_overload(name: &str, args: &[Value]) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingOverload {
        name: name.to_string(),
        arg_types: args.iter().map(|v| v.type_name().to_string()).collect(),
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

// Pattern Errors

#[cold]
pub fn missing_arguments(missing: &[Name]) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArguments {
        missing: missing.iter().map(ToString::to_string).collect(),
    })
}

#[cold]
pub fn not_enough_arguments(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotEnoughArguments { expected, got })
}

#[cold]
pub fn constant_mismatch(expected: &Value, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstantMismatch {
        expected: expected.display_value(),
        got: got.display_value(),
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn expected_array(got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExpectedArray {
        got: got.type_name().to_string(),
    })
}

// Evaluator Errors

#[cold]
pub fn unknown_expression(kind: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownExpression {
        kind: kind.to_string(),
    })
}

// Host Built-in Errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn invalid_operand(operation: &str, value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperand {
        operation: operation.to_string(),
        type_name: value.type_name().to_string(),
    })
}
