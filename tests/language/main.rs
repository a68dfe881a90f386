//! Integration tests for Layer 1: Language
//!
//! Tests for the lexer, statement parser, clause typing, and predicate
//! evaluation.

mod operators;
mod parsing;
mod predicates;
