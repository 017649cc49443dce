use std::panic::{catch_unwind, AssertUnwindSafe};

use kiln_patterns::{EvalError, EvalErrorKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn name(text: &str) -> Name {
    Name::new(text)
}

#[test]
fn test_define_global_twice_fails() {
    let mut env = Environment::new();
    env.define_global(name("x"), Value::int(1)).unwrap();
    let err = env.define_global(name("x"), Value::int(2)).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::AlreadyDefined {
            name: "x".to_string()
        }
    );
    assert_eq!(env.get("x").unwrap(), Value::int(1));
}

#[test]
fn test_set_global_requires_existing_binding() {
    let mut env = Environment::new();
    assert!(env.set_global("x", Value::Nil).is_err());
    env.define_global(name("x"), Value::int(1)).unwrap();
    env.set_global("x", Value::int(2)).unwrap();
    assert_eq!(env.get("x").unwrap(), Value::int(2));
}

#[test]
fn test_define_local_twice_fails() {
    let mut env = Environment::new();
    env.define_local(name("a"), Value::int(1)).unwrap();
    assert!(env.define_local(name("a"), Value::int(2)).is_err());
    assert_eq!(env.local_len(), 1);
}

#[test]
fn test_locals_shadow_globals() {
    let mut env = Environment::new();
    env.define_global(name("x"), Value::int(1)).unwrap();
    env.define_local(name("x"), Value::int(2)).unwrap();
    assert_eq!(env.get("x").unwrap(), Value::int(2));
    assert_eq!(env.global("x"), Some(Value::int(1)));
}

#[test]
fn test_set_prefers_local_then_global() {
    let mut env = Environment::new();
    env.define_global(name("g"), Value::int(0)).unwrap();
    env.define_local(name("l"), Value::int(0)).unwrap();

    env.set("l", Value::int(1)).unwrap();
    env.set("g", Value::int(2)).unwrap();
    assert_eq!(env.lookup("l"), Some(Value::int(1)));
    assert_eq!(env.global("g"), Some(Value::int(2)));

    let err = env.set("missing", Value::Nil).unwrap_err();
    assert_eq!(err.message, "undefined variable: missing");
}

#[test]
fn test_get_undefined() {
    let env = Environment::new();
    assert_eq!(
        env.get("nope").unwrap_err().kind,
        EvalErrorKind::UndefinedVariable {
            name: "nope".to_string()
        }
    );
}

#[test]
fn test_new_scope_shares_globals_not_locals() {
    let mut root = Environment::new();
    root.define_local(name("local"), Value::int(1)).unwrap();

    let mut child = root.new_scope();
    assert!(child.shares_globals(&root));
    assert_eq!(child.lookup("local"), None);

    // A global defined through the child is visible at the root
    child.define_global(name("shared"), Value::int(7)).unwrap();
    assert!(root.is_global("shared"));
    assert_eq!(root.get("shared").unwrap(), Value::int(7));
}

#[test]
fn test_new_scope_from_bindings() {
    let root = Environment::new();
    let mut locals = FxHashMap::default();
    locals.insert(name("a"), Value::int(1));
    let frame = root.new_scope_from(locals);
    assert_eq!(frame.local_len(), 1);
    assert_eq!(frame.get("a").unwrap(), Value::int(1));
}

#[test]
fn test_capture_snapshots_locals() {
    let mut env = Environment::new();
    env.define_global(name("g"), Value::int(0)).unwrap();
    env.define_local(name("a"), Value::int(1)).unwrap();
    let captured = env.capture();
    env.set("a", Value::int(2)).unwrap();

    assert_eq!(captured.get("a"), Some(&Value::int(1)));
    assert!(captured.get("g").is_none());
}

#[test]
fn test_let_in_binds_then_unbinds() {
    let mut env = Environment::new();
    let seen = env.let_in(name("x"), Value::int(5), |env| env.get("x"));
    assert_eq!(seen.unwrap(), Value::int(5));
    assert_eq!(env.lookup("x"), None);
}

#[test]
fn test_let_in_restores_previous_local() {
    let mut env = Environment::new();
    env.define_local(name("x"), Value::int(1)).unwrap();
    env.let_in(name("x"), Value::int(2), |env| {
        assert_eq!(env.lookup("x"), Some(Value::int(2)));
    });
    assert_eq!(env.lookup("x"), Some(Value::int(1)));
}

#[test]
fn test_let_in_shadows_global_without_touching_it() {
    let mut env = Environment::new();
    env.define_global(name("x"), Value::int(1)).unwrap();
    env.let_in(name("x"), Value::int(2), |env| {
        assert_eq!(env.lookup("x"), Some(Value::int(2)));
    });
    assert_eq!(env.lookup("x"), Some(Value::int(1)));
    assert_eq!(env.local_len(), 0);
}

#[test]
fn test_let_in_restores_after_failure() {
    let mut env = Environment::new();
    env.define_local(name("x"), Value::string("before")).unwrap();
    let result: Result<Value, EvalError> =
        env.let_in(name("x"), Value::int(0), |_| Err(EvalError::new("boom")));
    assert!(result.is_err());
    assert_eq!(env.lookup("x"), Some(Value::string("before")));
}

#[test]
fn test_let_in_restores_after_panic() {
    let mut env = Environment::new();
    env.define_local(name("x"), Value::int(1)).unwrap();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        env.let_in(name("x"), Value::int(2), |_| panic!("body panicked"));
    }));
    assert!(outcome.is_err());
    assert_eq!(env.lookup("x"), Some(Value::int(1)));
}

#[test]
fn test_nested_let_restores_in_order() {
    let mut env = Environment::new();
    env.let_in(name("x"), Value::int(1), |env| {
        env.let_in(name("x"), Value::int(2), |env| {
            assert_eq!(env.lookup("x"), Some(Value::int(2)));
        });
        assert_eq!(env.lookup("x"), Some(Value::int(1)));
    });
    assert_eq!(env.lookup("x"), None);
}

#[test]
fn test_local_scope_clone_shares_cell() {
    let a = LocalScope::new(vec![1, 2]);
    let b = a.clone();
    b.borrow_mut().push(3);
    assert_eq!(*a.borrow(), vec![1, 2, 3]);
    assert!(LocalScope::ptr_eq(&a, &b));
}

proptest! {
    #[test]
    fn prop_let_in_round_trips(
        prior in proptest::option::of(any::<i64>()),
        bound in any::<i64>(),
        fail in any::<bool>(),
    ) {
        let mut env = Environment::new();
        if let Some(n) = prior {
            env.define_local(name("x"), Value::int(n)).unwrap();
        }
        let before = env.lookup("x");

        let _ = env.let_in(name("x"), Value::int(bound), |env| {
            if fail {
                Err(EvalError::new("fail"))
            } else {
                env.get("x")
            }
        });

        prop_assert_eq!(env.lookup("x"), before);
    }
}
