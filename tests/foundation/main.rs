//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Vertex, Edge, Value, Action, ActionContext, Error.

mod actions;
mod context;
mod errors;
