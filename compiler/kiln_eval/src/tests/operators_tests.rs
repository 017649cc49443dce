//! Arithmetic built-ins.

use kiln_ir::Expr;
use kiln_patterns::Value;

use super::*;
use crate::{evaluate_binary, BinaryOp};

fn eval(expr: &Expr) -> EvalResult {
    let (mut interp, _) = interpreter();
    interp.eval(expr)
}

mod integers {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_and_multiply_fold() {
        assert_eq!(
            eval(&call("+", vec![int(1), int(2), int(3)])).unwrap(),
            Value::int(6)
        );
        assert_eq!(
            eval(&call("*", vec![int(2), int(3), int(4)])).unwrap(),
            Value::int(24)
        );
        assert_eq!(eval(&call("+", vec![])).unwrap(), Value::int(0));
        assert_eq!(eval(&call("*", vec![])).unwrap(), Value::int(1));
    }

    #[test]
    fn subtract_folds_left_and_negates_single() {
        assert_eq!(
            eval(&call("-", vec![int(10), int(3), int(2)])).unwrap(),
            Value::int(5)
        );
        assert_eq!(eval(&call("-", vec![int(5)])).unwrap(), Value::int(-5));
        assert!(matches!(
            error_kind(eval(&call("-", vec![]))),
            EvalErrorKind::ArityMismatch { .. }
        ));
    }

    #[test]
    fn division_and_remainder() {
        assert_eq!(eval(&call("/", vec![int(7), int(2)])).unwrap(), Value::int(3));
        assert_eq!(eval(&call("%", vec![int(7), int(3)])).unwrap(), Value::int(1));
        assert_eq!(
            error_kind(eval(&call("/", vec![int(1), int(0)]))),
            EvalErrorKind::DivisionByZero
        );
        assert_eq!(
            error_kind(eval(&call("%", vec![int(1), int(0)]))),
            EvalErrorKind::DivisionByZero
        );
    }

    #[test]
    fn binary_operators_take_two_arguments() {
        assert_eq!(
            error_kind(eval(&call("/", vec![int(1)]))),
            EvalErrorKind::ArityMismatch {
                name: "/".to_string(),
                expected: 2,
                got: 1,
            }
        );
    }

    #[test]
    fn power() {
        assert_eq!(
            eval(&call("**", vec![int(2), int(10)])).unwrap(),
            Value::int(1024)
        );
        assert_eq!(
            eval(&call("**", vec![int(2), int(-1)])).unwrap(),
            Value::Float(0.5)
        );
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(
            error_kind(eval(&call("+", vec![int(i64::MAX), int(1)]))),
            EvalErrorKind::IntegerOverflow {
                operation: "addition".to_string()
            }
        );
        assert!(eval(&call("-", vec![int(i64::MIN)])).is_err());
        assert!(eval(&call("/", vec![int(i64::MIN), int(-1)])).is_err());
        assert!(eval(&call("**", vec![int(10), int(40)])).is_err());
    }
}

mod mixed {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn int_and_float_promote() {
        assert_eq!(
            eval(&call("+", vec![int(1), Expr::Float(2.5)])).unwrap(),
            Value::Float(3.5)
        );
        assert_eq!(
            evaluate_binary(&Value::Float(1.0), &Value::int(2), BinaryOp::Div).unwrap(),
            Value::Float(0.5)
        );
    }

    #[test]
    fn strings_concatenate_with_plus_only() {
        assert_eq!(
            eval(&call("+", vec![Expr::string("ab"), Expr::string("cd")])).unwrap(),
            Value::string("abcd")
        );
        assert_eq!(
            error_kind(eval(&call("*", vec![Expr::string("a"), Expr::string("b")]))),
            EvalErrorKind::InvalidOperand {
                operation: "*".to_string(),
                type_name: "String".to_string(),
            }
        );
    }

    #[test]
    fn invalid_operand_names_the_offending_type() {
        assert_eq!(
            error_kind(eval(&call("+", vec![int(1), Expr::string("a")]))),
            EvalErrorKind::InvalidOperand {
                operation: "+".to_string(),
                type_name: "String".to_string(),
            }
        );
        assert_eq!(
            error_kind(eval(&call("-", vec![Expr::Nil, int(1)]))),
            EvalErrorKind::InvalidOperand {
                operation: "-".to_string(),
                type_name: "Nil".to_string(),
            }
        );
    }
}
