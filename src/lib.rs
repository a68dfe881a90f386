//! CDL - Constraint definition language for multi-agent grid simulations
//!
//! This crate re-exports all layers of the CDL system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: cdl_runtime    - Rule files, REPL, CLI
//! Layer 2: cdl_engine     - Rule sets, joint-action validation
//! Layer 1: cdl_language   - Lexer, parser, builder, predicates
//! Layer 0: cdl_foundation - Core types (Action, Value, ActionContext, Error)
//! ```

pub use cdl_engine as engine;
pub use cdl_foundation as foundation;
pub use cdl_language as language;
pub use cdl_runtime as runtime;
