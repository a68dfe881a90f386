//! Integration tests for predicate composition
//!
//! Clauses compare two number literals so each clause's truth value is fixed
//! by the rule text alone: `1 IS 1` is true, `1 IS 2` is false.

use cdl_foundation::Action;
use cdl_language::parse_constraint;

const T: &str = "1 IS 1";
const F: &str = "1 IS 2";

fn eval(predicate: &str) -> bool {
    let rule = parse_constraint(&format!("ACTION a IS BLOCKED IF {predicate}")).unwrap();
    rule.bind_and_evaluate(&Action::between((0, 0), (0, 0)), None)
        .unwrap()
}

#[test]
fn constant_clauses() {
    assert!(eval(T));
    assert!(!eval(F));
}

#[test]
fn left_fold_and_or() {
    // (T AND F) OR T = T; a right fold T AND (F OR T) also gives T here
    assert!(eval(&format!("{T} AND {F} OR {T}")));
}

#[test]
fn left_fold_differs_from_right_fold() {
    // (F AND T) OR T = T, right fold F AND (T OR T) = F
    assert!(eval(&format!("{F} AND {T} OR {T}")));
    // (T OR T) AND F = F, right fold T OR (T AND F) = T
    assert!(!eval(&format!("{T} OR {T} AND {F}")));
}

#[test]
fn negated_connectors() {
    assert!(!eval(&format!("{T} AND NOT {T}")));
    assert!(eval(&format!("{T} AND NOT {F}")));
    assert!(eval(&format!("{F} OR NOT {F}")));
    assert!(!eval(&format!("{F} OR NOT {T}")));
}

#[test]
fn long_chain() {
    // ((((T AND T) OR F) AND NOT F) OR NOT T) = T
    assert!(eval(&format!(
        "{T} AND {T} OR {F} AND NOT {F} OR NOT {T}"
    )));
}

#[test]
fn mixed_field_clauses() {
    let rule = parse_constraint(
        "ACTION a IS BLOCKED IF a.name IS 'Push(N,N)' AND NOT a.time MORE THAN 3 OR a.agent IS 9",
    )
    .unwrap();
    let push = Action::between((2, 2), (1, 2)).with_name("Push(N,N)");
    assert!(rule.bind_and_evaluate(&push.clone().with_time(3), None).unwrap());
    assert!(!rule.bind_and_evaluate(&push.clone().with_time(4), None).unwrap());
    assert!(rule.bind_and_evaluate(&push.with_time(4).with_agent(9), None).unwrap());
}
