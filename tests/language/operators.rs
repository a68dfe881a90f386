//! Integration tests for operator typing

use cdl_foundation::{ErrorCategory, Value, ValueType, Vertex};
use cdl_language::{Operand, Operator, OperatorKind};

#[test]
fn support_table() {
    use ValueType::{Edge, Number, String, Vertex};
    let supported = [
        (OperatorKind::Is, vec![String, Number, Vertex]),
        (OperatorKind::LessThan, vec![Number]),
        (OperatorKind::MoreThan, vec![Number]),
        (OperatorKind::OverlapsWith, vec![Edge]),
    ];
    for (kind, types) in supported {
        for value_type in ValueType::ALL {
            let expected = types.contains(&value_type);
            assert_eq!(kind.supports(value_type), expected, "{kind:?} {value_type}");
            assert_eq!(Operator::new(kind, false, value_type).is_ok(), expected);
        }
    }
}

#[test]
fn phrases_parse_per_type() {
    let ok = [
        ("IS", ValueType::String),
        ("IS NOT", ValueType::Vertex),
        ("IS LESS THAN", ValueType::Number),
        ("LESS THAN", ValueType::Number),
        ("IS NOT MORE THAN", ValueType::Number),
        ("OVERLAPS WITH", ValueType::Edge),
    ];
    for (phrase, value_type) in ok {
        assert!(Operator::parse(phrase, value_type).is_ok(), "{phrase}");
    }

    let rejected = [
        ("IS", ValueType::Edge),
        ("IS LESS THAN", ValueType::String),
        ("OVERLAPS WITH", ValueType::Vertex),
        ("IS OVERLAPS WITH", ValueType::Edge),
        ("EQUALS", ValueType::Number),
    ];
    for (phrase, value_type) in rejected {
        let err = Operator::parse(phrase, value_type).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Type, "{phrase}");
    }
}

#[test]
fn negation_inverts() {
    let is = Operator::parse("IS", ValueType::Vertex).unwrap();
    let is_not = Operator::parse("IS NOT", ValueType::Vertex).unwrap();
    let a = Value::Vertex(Vertex::new(1, 1));
    let b = Value::Vertex(Vertex::new(1, 2));
    for (l, r) in [(&a, &a), (&a, &b)] {
        assert_eq!(is.apply(l, r).unwrap(), !is_not.apply(l, r).unwrap());
    }
}

#[test]
fn number_comparisons_are_strict() {
    let less = Operator::parse("IS LESS THAN", ValueType::Number).unwrap();
    let more = Operator::parse("IS MORE THAN", ValueType::Number).unwrap();
    let five = Value::Number(5);
    assert!(!less.apply(&five, &five).unwrap());
    assert!(!more.apply(&five, &five).unwrap());
    assert!(less.apply(&Value::Number(4), &five).unwrap());
    assert!(more.apply(&Value::Number(6), &five).unwrap());
}

#[test]
fn operand_typing() {
    let cases = [
        ("'Move(N)'", ValueType::String),
        ("17", ValueType::Number),
        ("a.orig", ValueType::Vertex),
        ("a.origin", ValueType::Vertex),
        ("b.destination", ValueType::Vertex),
        ("a.edge", ValueType::Edge),
        ("a.time", ValueType::Number),
        ("a.agent", ValueType::Number),
        ("a.name", ValueType::String),
    ];
    for (text, value_type) in cases {
        assert_eq!(Operand::parse(text).unwrap().value_type(), value_type, "{text}");
    }
    for text in ["A.dest", "a.speed", "dest", "''", "'unterminated", "1.5"] {
        let err = Operand::parse(text).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Operand, "{text}");
    }
}
