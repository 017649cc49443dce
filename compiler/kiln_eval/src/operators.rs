//! Arithmetic behind the prelude's `+ - * / % **`.
//!
//! Integer arithmetic is checked: overflow is an `IntegerOverflow` error,
//! never a wrap or a panic. Mixing an `Int` with a `Float` promotes to
//! `Float`. `+` also concatenates two strings.

use kiln_patterns::errors::{division_by_zero, integer_overflow, invalid_operand};
use kiln_patterns::{EvalResult, Value};

/// Binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinaryOp {
    /// The prelude name of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "**",
        }
    }

    fn operation(self) -> &'static str {
        match self {
            BinaryOp::Add => "addition",
            BinaryOp::Sub => "subtraction",
            BinaryOp::Mul => "multiplication",
            BinaryOp::Div => "division",
            BinaryOp::Rem => "remainder",
            BinaryOp::Pow => "exponentiation",
        }
    }
}

#[inline]
fn checked_arith(result: Option<i64>, op: BinaryOp) -> EvalResult {
    result
        .map(Value::Int)
        .ok_or_else(|| integer_overflow(op.operation()))
}

/// Apply `op` to two values.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => Ok(eval_float_binary(*a, *b, op)),
        (Value::Int(a), Value::Float(b)) => Ok(eval_float_binary(int_to_float(*a), *b, op)),
        (Value::Float(a), Value::Int(b)) => Ok(eval_float_binary(*a, int_to_float(*b), op)),
        (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        (Value::Int(_) | Value::Float(_), _) => Err(invalid_operand(op.symbol(), right)),
        _ => Err(invalid_operand(op.symbol(), left)),
    }
}

/// Negation, for `-` with one argument.
pub(crate) fn negate(value: &Value) -> EvalResult {
    match value {
        Value::Int(n) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        Value::Float(f) => Ok(Value::Float(-f)),
        other => Err(invalid_operand("-", other)),
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), op),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), op),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), op),
        BinaryOp::Div if b == 0 => Err(division_by_zero()),
        BinaryOp::Div => checked_arith(a.checked_div(b), op),
        BinaryOp::Rem if b == 0 => Err(division_by_zero()),
        BinaryOp::Rem => checked_arith(a.checked_rem(b), op),
        // A negative exponent leaves the integers.
        BinaryOp::Pow if b < 0 => Ok(Value::Float(int_to_float(a).powf(int_to_float(b)))),
        BinaryOp::Pow => {
            let exp = u32::try_from(b).map_err(|_| integer_overflow(op.operation()))?;
            checked_arith(a.checked_pow(exp), op)
        }
    }
}

fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> Value {
    Value::Float(match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Rem => a % b,
        BinaryOp::Pow => a.powf(b),
    })
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Int to Float promotion is lossy by definition"
)]
fn int_to_float(n: i64) -> f64 {
    n as f64
}
