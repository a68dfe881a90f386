//! Lexer, typed clause model, and statement parser for CDL.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of rule text
//! - [`Operand`], [`Operator`], [`Connector`] - The typed pieces of a clause
//! - [`Expression`] and [`Predicate`] - Clause chains and their left-fold evaluation
//! - [`ConstraintBuilder`] - Token-driven state machine producing rules
//! - [`ConstraintParser`] and [`parse_constraint`] - Statement parsing
//! - [`ConstraintTemplate`] and [`Constraint`] - Compiled rules, unbound and bound
//!
//! A statement has the shape
//!
//! ```text
//! ACTION a IS BLOCKED BY ACTION b IF a.dest IS b.dest OR a.edge OVERLAPS WITH b.edge
//! ```
//!
//! and compiles once into an immutable [`ConstraintTemplate`]. Each evaluation
//! binds the template to one or two concrete actions, producing a short-lived
//! [`Constraint`] over a shared predicate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod connector;
pub mod constraint;
pub mod expression;
pub mod lexer;
pub mod operand;
pub mod operator;
pub mod parser;
pub mod span;
pub mod state;
pub mod token;


pub use builder::{ConstraintBuilder, ContextSlot};
pub use connector::{Connector, ConnectorKind};
pub use constraint::{Constraint, ConstraintTemplate};
pub use expression::{Expression, Predicate};
pub use lexer::Lexer;
pub use operand::Operand;
pub use operator::{Operator, OperatorKind};
pub use parser::{ConstraintParser, parse_constraint};
pub use span::Span;
pub use state::PredicateState;
pub use token::{Token, TokenKind};
