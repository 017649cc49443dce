use pretty_assertions::assert_eq;

use super::*;
use crate::EvalErrorKind;

fn names(list: &[&str]) -> Vec<Name> {
    list.iter().copied().map(Name::new).collect()
}

fn kind<T>(result: Result<T, EvalError>) -> Option<EvalErrorKind> {
    result.err().map(|e| e.kind)
}

// FullUntyped

#[test]
fn test_untyped_binds_positionals() {
    let pattern = Pattern::untyped(names(&["a", "b"]));
    let bindings = pattern.matches(&[Value::int(1), Value::int(2)]).unwrap();
    assert_eq!(bindings.get("a"), Some(&Value::int(1)));
    assert_eq!(bindings.get("b"), Some(&Value::int(2)));
}

#[test]
fn test_untyped_reports_missing_names() {
    let pattern = Pattern::untyped(names(&["a", "b", "c"]));
    assert_eq!(
        kind(pattern.matches(&[Value::int(1)])),
        Some(EvalErrorKind::MissingArguments {
            missing: vec!["b".to_string(), "c".to_string()],
        })
    );
}

#[test]
fn test_untyped_ignores_extra_arguments() {
    let pattern = Pattern::untyped(names(&["a"]));
    let bindings = pattern.matches(&[Value::int(1), Value::int(2)]).unwrap();
    assert_eq!(bindings.len(), 1);
}

#[test]
fn test_untyped_variadic_collects_rest() {
    let pattern = Pattern::variadic(names(&["a"]), Name::new("rest"));
    let bindings = pattern
        .matches(&[Value::int(1), Value::int(2), Value::int(3)])
        .unwrap();
    assert_eq!(
        bindings.get("rest"),
        Some(&Value::array(vec![Value::int(2), Value::int(3)]))
    );

    let empty = pattern.matches(&[Value::int(1)]).unwrap();
    assert_eq!(empty.get("rest"), Some(&Value::array(vec![])));
}

// Arguments

#[test]
fn test_arguments_not_enough() {
    let pattern = Pattern::arguments(vec![Argument::variable("a"), Argument::variable("b")]);
    assert_eq!(
        kind(pattern.matches(&[Value::Nil])),
        Some(EvalErrorKind::NotEnoughArguments {
            expected: 2,
            got: 1
        })
    );
}

#[test]
fn test_first_failing_slot_reports() {
    let pattern = Pattern::arguments(vec![
        Argument::constant(Value::int(0)),
        Argument::typed("s", "String"),
    ]);
    // Both slots fail; the first one wins
    let err = pattern.matches(&[Value::int(1), Value::int(2)]).err();
    assert_eq!(err.map(|e| e.message).as_deref(), Some("1 does not match 0"));
}

#[test]
fn test_constant_has_no_numeric_coercion() {
    let pattern = Pattern::arguments(vec![Argument::constant(Value::int(0))]);
    assert!(pattern.matches(&[Value::int(0)]).is_ok());
    assert_eq!(
        pattern.matches(&[Value::Float(0.0)]).err().map(|e| e.message).as_deref(),
        Some("0 does not match 0")
    );
}

#[test]
fn test_float_constant_matches_exactly() {
    let zero = Pattern::arguments(vec![Argument::constant(Value::Float(0.0))]);
    assert!(zero.matches(&[Value::Float(0.0)]).is_ok());
    assert!(matches!(
        kind(zero.matches(&[Value::Float(1e-17)])),
        Some(EvalErrorKind::ConstantMismatch { .. })
    ));

    let infinity = Pattern::arguments(vec![Argument::constant(Value::Float(f64::INFINITY))]);
    assert!(infinity.matches(&[Value::Float(f64::INFINITY)]).is_ok());
}

#[test]
fn test_constant_binds_nothing() {
    let pattern = Pattern::arguments(vec![Argument::constant(Value::string("a"))]);
    let bindings = pattern.matches(&[Value::string("a")]).unwrap();
    assert!(bindings.is_empty());
}

#[test]
fn test_typed_argument() {
    let pattern = Pattern::arguments(vec![Argument::typed("xs", "Array")]);
    assert!(pattern.matches(&[Value::array(vec![])]).is_ok());
    assert_eq!(
        kind(pattern.matches(&[Value::int(1)])),
        Some(EvalErrorKind::TypeMismatch {
            expected: "Array".to_string(),
            got: "Int".to_string(),
        })
    );
}

#[test]
fn test_variable_binding_binds_whole_value() {
    let inner = ArgumentsPattern::new(vec![Argument::variable("a")]);
    let pattern = Pattern::arguments(vec![Argument::binding("whole", inner)]);
    // The inner pattern is not consulted, so a non-array still matches
    let bindings = pattern.matches(&[Value::int(9)]).unwrap();
    assert_eq!(bindings.get("whole"), Some(&Value::int(9)));
    assert!(bindings.get("a").is_none());
}

#[test]
fn test_array_destructure() {
    let pattern = Pattern::arguments(vec![
        Argument::array(vec![Argument::variable("a"), Argument::variable("b")]),
        Argument::variable("f"),
    ]);
    let args = [
        Value::array(vec![Value::int(1), Value::int(2), Value::int(3)]),
        Value::string("fn"),
    ];
    let bindings = pattern.matches(&args).unwrap();
    assert_eq!(bindings.get("a"), Some(&Value::int(1)));
    assert_eq!(bindings.get("b"), Some(&Value::int(2)));
    assert_eq!(bindings.get("f"), Some(&Value::string("fn")));
}

#[test]
fn test_array_destructure_with_rest() {
    let nested = ArgumentsPattern::new(vec![Argument::variable("head")]).with_variadic("tail");
    let pattern = Pattern::Arguments(ArgumentsPattern::new(vec![Argument::ArrayDestructure(
        nested,
    )]));
    let bindings = pattern
        .matches(&[Value::array(vec![Value::int(1), Value::int(2)])])
        .unwrap();
    assert_eq!(bindings.get("head"), Some(&Value::int(1)));
    assert_eq!(bindings.get("tail"), Some(&Value::array(vec![Value::int(2)])));
}

#[test]
fn test_array_destructure_rejects_non_array() {
    let pattern = Pattern::arguments(vec![Argument::array(vec![Argument::variable("a")])]);
    assert_eq!(
        kind(pattern.matches(&[Value::string("no")])),
        Some(EvalErrorKind::ExpectedArray {
            got: "String".to_string()
        })
    );
}

#[test]
fn test_array_destructure_too_short() {
    let pattern = Pattern::arguments(vec![Argument::array(vec![
        Argument::variable("a"),
        Argument::variable("b"),
    ])]);
    assert_eq!(
        kind(pattern.matches(&[Value::array(vec![Value::int(1)])])),
        Some(EvalErrorKind::NotEnoughArguments {
            expected: 2,
            got: 1
        })
    );
}
