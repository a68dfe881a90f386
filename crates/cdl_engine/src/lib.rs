//! Rule-set partitioning and joint-action validation for CDL.
//!
//! This crate provides:
//! - [`RuleSet`] - Parsed rules split into applicability and conflict rules
//! - [`JointActionValidator`] - Per-step applicability of every agent's action
//! - [`Occupancy`] - The grid-occupancy query the simulation layer supplies
//! - [`ValidatorConfig`] - Failure policy and occupancy checking

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod occupancy;
pub mod rule_set;
pub mod validator;

pub use config::{RebindFailurePolicy, ValidatorConfig};
pub use occupancy::{NoObstacles, Occupancy};
pub use rule_set::RuleSet;
pub use validator::{JointActionValidator, ValidationReport};
