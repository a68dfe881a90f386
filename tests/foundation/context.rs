//! Integration tests for ActionContext

use cdl_foundation::{Action, ActionContext, ErrorKind, Field, Value, Vertex};

#[test]
fn dotted_keys_match_direct_lookup() {
    let action = Action::new(Vertex::new(2, 3), Vertex::new(2, 4), 9, "Move(E)", 1);
    let context = ActionContext::with_bindings([("agent", &action)]);

    for field in Field::ALL {
        let key = format!("agent.{field}");
        assert_eq!(
            context.get(&key).unwrap(),
            context.resolve("agent", field).unwrap(),
            "{key}"
        );
    }
}

#[test]
fn two_contexts_are_independent() {
    let first = Action::between((0, 0), (0, 1));
    let second = Action::between((5, 5), (6, 5));
    let context = ActionContext::with_bindings([("a", &first), ("b", &second)]);

    assert_eq!(context.get("a.dest").unwrap(), Value::Vertex(Vertex::new(0, 1)));
    assert_eq!(context.get("b.dest").unwrap(), Value::Vertex(Vertex::new(6, 5)));
}

#[test]
fn unbound_name_is_unknown_key() {
    let action = Action::between((0, 0), (0, 0));
    let context = ActionContext::with_bindings([("a", &action)]);
    let err = context.resolve("b", Field::Time).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownContextKey(ref key) if key == "b.time"));
}

#[test]
fn empty_context() {
    let context = ActionContext::new();
    assert!(context.is_empty());
    assert!(context.get("a.dest").is_err());
}
