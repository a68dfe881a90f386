//! Integration tests for Error types
//!
//! Tests error construction, display, context, and categories.

use cdl_foundation::{Error, ErrorCategory, ErrorContext, ErrorKind, ValueType};

// =============================================================================
// Categories
// =============================================================================

#[test]
fn every_kind_has_a_category() {
    let cases = [
        (
            ErrorKind::MalformedStatement {
                statement: "x".into(),
                pattern: "p",
            },
            ErrorCategory::Parse,
        ),
        (ErrorKind::InvalidOperand("x".into()), ErrorCategory::Operand),
        (ErrorKind::UnknownOperator("IS ABOUT".into()), ErrorCategory::Type),
        (
            ErrorKind::UnsupportedOperandType {
                operator: "IS LESS THAN".into(),
                value_type: ValueType::Vertex,
            },
            ErrorCategory::Type,
        ),
        (ErrorKind::EmptyToken, ErrorCategory::BuilderState),
        (ErrorKind::MissingContextEntry("c".into()), ErrorCategory::Binding),
        (
            ErrorKind::ValueKindMismatch {
                expected: ValueType::Number,
                actual: ValueType::String,
            },
            ErrorCategory::Eval,
        ),
        (
            ErrorKind::Io {
                path: "rules.cdl".into(),
                message: "denied".into(),
            },
            ErrorCategory::Io,
        ),
    ];
    for (kind, category) in cases {
        assert_eq!(kind.category(), category, "{kind}");
    }
}

#[test]
fn only_internal_failures_are_defects() {
    assert!(Error::new(ErrorKind::IncompletePredicate).is_defect());
    assert!(Error::unknown_context_key("a.dest").is_defect());
    assert!(!Error::missing_binding("restricting").is_defect());
    assert!(!Error::incompatible_operands(ValueType::Edge, ValueType::Vertex).is_defect());
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_includes_source_and_line() {
    let err = Error::invalid_operand("A.dest")
        .with_context(ErrorContext::new().with_source("maze.cdl").with_line(12));
    let msg = err.to_string();
    assert!(msg.contains("A.dest"));
    assert!(msg.ends_with("(at maze.cdl:12)"));
}

#[test]
fn display_without_context() {
    let err = Error::unsupported_operand_type("OVERLAPS WITH", ValueType::Number);
    assert_eq!(
        err.to_string(),
        "operator OVERLAPS WITH does not support operands of type number"
    );
}
