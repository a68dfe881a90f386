//! Integration tests for RuleSet

use cdl_engine::RuleSet;
use cdl_foundation::Action;
use cdl_language::parse_constraint;

const RULES: [&str; 4] = [
    "ACTION a IS BLOCKED BY ACTION b IF a.dest IS b.dest",
    "ACTION a IS BLOCKED IF a.name IS 'Wait'",
    "ACTION a IS BLOCKED BY ACTION b IF a.edge OVERLAPS WITH b.edge",
    "ACTION a IS BLOCKED IF a.time IS MORE THAN 100",
];

fn rules() -> RuleSet {
    RULES.iter().map(|l| parse_constraint(l).unwrap()).collect()
}

#[test]
fn partition_keeps_source_order() {
    let rules = rules();
    assert_eq!(rules.len(), 4);
    let single: Vec<String> = rules.applicability_rules().iter().map(ToString::to_string).collect();
    let double: Vec<String> = rules.conflict_rules().iter().map(ToString::to_string).collect();
    assert_eq!(single, vec![RULES[1], RULES[3]]);
    assert_eq!(double, vec![RULES[0], RULES[2]]);
}

#[test]
fn blocks_any_applicability_rule() {
    let rules = rules();
    let wait = Action::between((0, 0), (0, 0)).with_name("Wait");
    let late = Action::between((0, 0), (0, 1)).with_time(101);
    let fine = Action::between((0, 0), (0, 1)).with_time(5);
    assert!(rules.blocks(&wait).unwrap());
    assert!(rules.blocks(&late).unwrap());
    assert!(!rules.blocks(&fine).unwrap());
    assert_eq!(rules.blocking_rule(&late).unwrap().unwrap().to_string(), RULES[3]);
}

#[test]
fn conflicts_any_conflict_rule() {
    let rules = rules();
    let a = Action::between((1, 0), (1, 1));
    let touching = Action::between((1, 1), (1, 2)).with_agent(1);
    let far = Action::between((8, 8), (8, 9)).with_agent(2);
    assert!(rules.conflicts(&a, &touching).unwrap());
    assert!(!rules.conflicts(&a, &far).unwrap());
    assert_eq!(
        rules.conflicting_rule(&a, &touching).unwrap().unwrap().to_string(),
        RULES[2]
    );
}

#[test]
fn empty_rule_set_blocks_nothing() {
    let rules = RuleSet::new();
    let action = Action::between((0, 0), (0, 1));
    assert!(rules.is_empty());
    assert!(!rules.blocks(&action).unwrap());
    assert!(!rules.conflicts(&action, &action).unwrap());
}
