//! Integration tests for statement parsing

use cdl_foundation::{Action, ErrorCategory, ErrorKind};
use cdl_language::{ConstraintParser, Lexer, TokenKind, parse_constraint};

// =============================================================================
// Context partitioning
// =============================================================================

#[test]
fn single_context_rule() {
    let rule = parse_constraint("ACTION a IS BLOCKED IF a.time IS 0").unwrap();
    assert!(rule.is_single_context());
    assert_eq!(rule.requesting_name(), "a");
    assert_eq!(rule.restricting_name(), None);
}

#[test]
fn double_context_rule() {
    let rule = parse_constraint("ACTION a IS BLOCKED BY ACTION b IF a.dest IS b.dest").unwrap();
    assert!(!rule.is_single_context());
    assert_eq!(rule.restricting_name(), Some("b"));
}

#[test]
fn double_context_rule_needs_both_bindings() {
    let rule = parse_constraint("ACTION a IS BLOCKED BY ACTION b IF a.dest IS b.dest").unwrap();
    let action = Action::between((0, 0), (0, 1));
    let err = rule.bind(&action, None).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Binding);
}

#[test]
fn context_names_are_free() {
    let rule = parse_constraint(
        "ACTION mover IS BLOCKED BY ACTION other IF mover.destination IS other.origin",
    )
    .unwrap();
    let mover = Action::between((0, 0), (0, 1));
    let other = Action::between((0, 1), (0, 2));
    assert!(rule.bind_and_evaluate(&mover, Some(&other)).unwrap());
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn scenario_name_and_time() {
    let rule =
        parse_constraint("ACTION a IS BLOCKED IF a.name IS 'NoOp' AND a.time IS LESS THAN 10")
            .unwrap();
    let early = Action::between((0, 0), (0, 0)).with_time(0);
    let late = Action::between((0, 0), (0, 0)).with_time(11);
    assert!(rule.bind_and_evaluate(&early, None).unwrap());
    assert!(!rule.bind_and_evaluate(&late, None).unwrap());
}

#[test]
fn scenario_vertex_conflict() {
    let rule = parse_constraint("ACTION a IS BLOCKED BY ACTION b IF a.dest IS b.dest").unwrap();
    let requesting = Action::between((1, 0), (1, 1));
    let same = Action::between((0, 1), (1, 1));
    let elsewhere = Action::between((0, 2), (1, 2));
    assert!(rule.bind_and_evaluate(&requesting, Some(&same)).unwrap());
    assert!(!rule.bind_and_evaluate(&requesting, Some(&elsewhere)).unwrap());
}

#[test]
fn rule_can_be_rebound_many_times() {
    let rule = parse_constraint("ACTION a IS BLOCKED IF a.agent MORE THAN 2").unwrap();
    let verdicts: Vec<bool> = (0..6)
        .map(|agent| {
            let action = Action::between((0, 0), (0, 0)).with_agent(agent);
            rule.bind_and_evaluate(&action, None).unwrap()
        })
        .collect();
    assert_eq!(verdicts, vec![false, false, false, true, true, true]);
}

// =============================================================================
// Malformed input
// =============================================================================

#[test]
fn missing_second_operand_is_parse_error() {
    let err = parse_constraint("ACTION a IS BLOCKED IF a.name IS").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedPredicate { .. }));
}

#[test]
fn error_categories() {
    let cases = [
        ("ACTION a IS BLOCKED", ErrorCategory::Parse),
        ("ACTION a BLOCKED IF a.time IS 0", ErrorCategory::Parse),
        ("ACTION a IS BLOCKED IF a.time IS 0 XOR a.time IS 1", ErrorCategory::Parse),
        ("ACTION a IS BLOCKED IF a.speed IS 0", ErrorCategory::Operand),
        ("ACTION a IS BLOCKED IF a.name IS 5", ErrorCategory::Type),
        ("ACTION a IS BLOCKED IF a.dest IS LESS THAN a.orig", ErrorCategory::Type),
        ("ACTION a IS BLOCKED IF a.time IS ABOUT 5", ErrorCategory::Type),
        ("ACTION a IS BLOCKED IF c.time IS 5", ErrorCategory::Binding),
    ];
    for (line, category) in cases {
        let err = parse_constraint(line).unwrap_err();
        assert_eq!(err.category(), category, "{line}: {err}");
        assert!(!err.is_defect(), "{line}");
    }
}

#[test]
fn parser_exposes_builder() {
    let builder = ConstraintParser::new()
        .parse("ACTION a IS BLOCKED BY ACTION b IF a.edge OVERLAPS WITH b.edge")
        .unwrap();
    assert_eq!(builder.expressions().len(), 1);
    assert!(!builder.is_single_context_constraint().unwrap());
}

// =============================================================================
// Lexer
// =============================================================================

#[test]
fn lexer_classifies_tokens() {
    let kinds: Vec<TokenKind> = Lexer::tokenize_all("a.dest IS 'Move(N)' 42 b")
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert!(matches!(kinds[0], TokenKind::Reference { .. }));
    assert!(matches!(kinds[1], TokenKind::Word(ref w) if w == "IS"));
    assert!(matches!(kinds[2], TokenKind::Str(ref s) if s == "Move(N)"));
    assert!(matches!(kinds[3], TokenKind::Int(42)));
    assert!(matches!(kinds[4], TokenKind::Name(ref n) if n == "b"));
    assert!(matches!(kinds[5], TokenKind::Eof));
}
