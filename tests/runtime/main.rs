//! Integration tests for Layer 3: Runtime
//!
//! Tests for rule files, the bundled default rules, and the REPL session.

mod reader;
mod repl;
