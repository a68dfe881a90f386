//! Rule files, REPL, and CLI for CDL.
//!
//! This crate provides:
//! - [`ConstraintReader`] - loading rule files line by line
//! - [`Session`] - the rules loaded so far, and validation against them
//! - [`Repl`] - interactive read-eval-print loop

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod highlight;
pub mod reader;
pub mod repl;
pub mod session;

pub use config::ReaderConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor, ScriptEditor};
pub use highlight::CdlHighlighter;
pub use reader::{ConstraintReader, DEFAULT_RULES};
pub use repl::Repl;
pub use session::Session;
