//! Integration tests for JointActionValidator

use std::collections::HashSet;

use cdl_engine::{JointActionValidator, NoObstacles, RuleSet, ValidatorConfig};
use cdl_foundation::{Action, Vertex};
use cdl_language::parse_constraint;

/// The classic multi-agent pathfinding conflicts.
fn mapf_rules() -> RuleSet {
    [
        "ACTION a IS BLOCKED BY ACTION b IF a.dest IS b.dest",
        "ACTION a IS BLOCKED BY ACTION b IF a.dest IS b.orig",
        "ACTION a IS BLOCKED BY ACTION b IF a.edge OVERLAPS WITH b.edge",
    ]
    .iter()
    .map(|l| parse_constraint(l).unwrap())
    .collect()
}

fn mv(agent: i64, from: (i32, i32), to: (i32, i32)) -> Action {
    Action::between(from, to).with_agent(agent).with_name("Move")
}

// =============================================================================
// Conflicts
// =============================================================================

#[test]
fn independent_agents_are_applicable() {
    let validator = JointActionValidator::new(mapf_rules());
    let actions = [mv(0, (0, 0), (0, 1)), mv(1, (5, 5), (5, 6)), mv(2, (9, 0), (8, 0))];
    assert_eq!(
        validator.applicable(&actions, &NoObstacles).unwrap(),
        vec![true, true, true]
    );
}

#[test]
fn swap_marks_both_agents() {
    let validator = JointActionValidator::new(mapf_rules());
    let actions = [mv(0, (1, 1), (1, 2)), mv(1, (1, 2), (1, 1))];
    assert_eq!(
        validator.applicable(&actions, &NoObstacles).unwrap(),
        vec![false, false]
    );
}

#[test]
fn only_conflicting_pair_is_rejected() {
    let validator = JointActionValidator::new(mapf_rules());
    let actions = [
        mv(0, (0, 0), (0, 1)),
        mv(1, (4, 4), (4, 5)),
        mv(2, (0, 2), (0, 1)),
    ];
    let report = validator.validate(&actions, &NoObstacles).unwrap();
    assert_eq!(report.applicable, vec![false, true, false]);
    assert_eq!(report.conflicting, vec![true, false, true]);
    assert!(!report.all_applicable());
}

#[test]
fn single_action_never_conflicts() {
    let validator = JointActionValidator::new(mapf_rules());
    let actions = [mv(0, (0, 0), (0, 1))];
    assert_eq!(validator.applicable(&actions, &NoObstacles).unwrap(), vec![true]);
    assert!(validator.applicable(&[], &NoObstacles).unwrap().is_empty());
}

// =============================================================================
// Applicability rules and occupancy
// =============================================================================

#[test]
fn applicability_rule_blocks_only_its_action() {
    let mut rules = mapf_rules();
    rules.push(parse_constraint("ACTION a IS BLOCKED IF a.name IS 'Push(N,N)'").unwrap());
    let validator = JointActionValidator::new(rules);
    let actions = [
        mv(0, (3, 3), (2, 3)).with_name("Push(N,N)"),
        mv(1, (6, 6), (6, 7)),
    ];
    let report = validator.validate(&actions, &NoObstacles).unwrap();
    assert_eq!(report.blocked, vec![true, false]);
    assert_eq!(report.applicable, vec![false, true]);
}

#[test]
fn occupied_destination_rejects_moving_action() {
    let walls: HashSet<Vertex> = [Vertex::new(0, 1)].into_iter().collect();
    let actions = [mv(0, (0, 0), (0, 1)), Action::between((0, 1), (0, 1)).with_agent(1)];

    let validator = JointActionValidator::new(RuleSet::new());
    let report = validator.validate(&actions, &walls).unwrap();
    assert_eq!(report.occupied, vec![true, false]);
    assert_eq!(report.applicable, vec![false, true]);

    let rules_only = JointActionValidator::with_config(RuleSet::new(), ValidatorConfig::rules_only());
    assert_eq!(rules_only.applicable(&actions, &walls).unwrap(), vec![true, true]);
}

#[test]
fn closure_occupancy() {
    let validator = JointActionValidator::new(RuleSet::new());
    let inside = |v: Vertex| (0..4).contains(&v.row) && (0..4).contains(&v.col);
    let actions = [mv(0, (3, 3), (3, 4)), mv(1, (2, 2), (2, 3))];
    assert_eq!(validator.applicable(&actions, &inside).unwrap(), vec![false, true]);
}
