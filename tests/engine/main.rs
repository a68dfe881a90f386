//! Integration tests for Layer 2: Engine
//!
//! Tests for rule-set partitioning and joint-action validation.

mod rule_sets;
mod validation;
