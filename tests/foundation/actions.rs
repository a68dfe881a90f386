//! Integration tests for actions, edges and values

use cdl_foundation::{Action, Edge, ErrorKind, Field, Value, ValueType, Vertex};

fn edge(a: (i32, i32), b: (i32, i32)) -> Edge {
    Edge::new(a.into(), b.into())
}

// =============================================================================
// Edge overlap
// =============================================================================

#[test]
fn identical_edges_overlap() {
    assert!(edge((1, 1), (1, 2)).overlaps(&edge((1, 1), (1, 2))));
}

#[test]
fn edges_sharing_an_endpoint_overlap() {
    assert!(edge((1, 0), (1, 1)).overlaps(&edge((1, 1), (1, 2))));
}

#[test]
fn disjoint_edges_do_not_overlap() {
    assert!(!edge((1, 0), (1, 1)).overlaps(&edge((2, 2), (2, 3))));
}

#[test]
fn overlap_is_symmetric() {
    let cases = [
        (edge((0, 0), (0, 1)), edge((0, 1), (0, 2))),
        (edge((0, 0), (0, 1)), edge((5, 5), (5, 6))),
        (edge((3, 3), (3, 3)), edge((3, 3), (3, 4))),
        (edge((1, 1), (1, 2)), edge((1, 2), (1, 1))),
    ];
    for (a, b) in cases {
        assert_eq!(a.overlaps(&b), b.overlaps(&a), "{a} / {b}");
    }
}

#[test]
fn overlap_is_not_transitive() {
    let a = edge((0, 0), (0, 1));
    let b = edge((0, 1), (0, 2));
    let c = edge((0, 2), (0, 3));
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&c));
    assert!(!a.overlaps(&c));
}

#[test]
fn stationary_edge_uses_endpoint_comparison() {
    let still = edge((2, 2), (2, 2));
    assert!(still.overlaps(&still));
    assert!(still.overlaps(&edge((2, 1), (2, 2))));
    assert!(!still.overlaps(&edge((2, 3), (2, 4))));
}

// =============================================================================
// Action fields
// =============================================================================

#[test]
fn every_field_has_its_declared_type() {
    let action = Action::new(Vertex::new(0, 0), Vertex::new(1, 0), 2, "Move(S)", 7);
    for field in Field::ALL {
        assert_eq!(action.field(field).value_type(), field.value_type(), "{field}");
    }
}

#[test]
fn edge_field_is_origin_to_destination() {
    let action = Action::between((4, 1), (4, 2));
    assert_eq!(action.field(Field::Edge), Value::Edge(edge((4, 1), (4, 2))));
    assert_eq!(action.field(Field::Edge).value_type(), ValueType::Edge);
}

#[test]
fn action_literal() {
    let action: Action = "[name=Move(E) orig=1,1 dest=1,2 time=0 agent=0]".parse().unwrap();
    assert_eq!(action, Action::between((1, 1), (1, 2)).with_name("Move(E)"));
}

#[test]
fn action_literal_long_keys() {
    let action: Action = "[origin=3,3 destination=2,3 agent=4]".parse().unwrap();
    assert_eq!(action.origin, Vertex::new(3, 3));
    assert_eq!(action.destination, Vertex::new(2, 3));
    assert_eq!(action.agent, 4);
}

#[test]
fn action_literal_rejects_unknown_key() {
    let err = "[color=red]".parse::<Action>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidAction { .. }));
    assert!(err.to_string().contains("color"));
}
