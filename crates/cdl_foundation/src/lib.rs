//! Core types for the Constraint Description Language (CDL).
//!
//! This crate provides:
//! - [`Vertex`], [`Edge`], [`Value`] - The values a CDL clause compares
//! - [`ValueType`] - The closed set of value kinds clauses are typed over
//! - [`Action`] and [`Field`] - A single agent's proposed move and its readable fields
//! - [`ActionContext`] - Binding of rule variables to concrete actions
//! - [`Error`] - Error kinds with rule/line context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod context;
pub mod error;
pub mod types;
pub mod value;

pub use action::{Action, Field};
pub use context::ActionContext;
pub use error::{Error, ErrorCategory, ErrorContext, ErrorKind};
pub use types::ValueType;
pub use value::{Edge, Value, Vertex};

/// Result type for CDL operations.
pub type Result<T> = std::result::Result<T, Error>;
