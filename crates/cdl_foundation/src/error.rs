//! Error types for the CDL engine.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::ValueType;

/// The main error type for CDL operations.
#[derive(Debug, Error)]
#[error("{kind}{}", context_suffix(.context))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Returns the taxonomy category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Returns true if this error indicates a broken internal invariant
    /// rather than bad rule text or a bad binding.
    #[must_use]
    pub fn is_defect(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::BuilderState | ErrorCategory::Eval
        )
    }

    /// Creates an invalid operand error.
    #[must_use]
    pub fn invalid_operand(token: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidOperand(token.into()))
    }

    /// Creates an operand type mismatch error.
    #[must_use]
    pub fn incompatible_operands(left: ValueType, right: ValueType) -> Self {
        Self::new(ErrorKind::IncompatibleOperandTypes { left, right })
    }

    /// Creates an unsupported operand type error.
    #[must_use]
    pub fn unsupported_operand_type(operator: impl Into<String>, value_type: ValueType) -> Self {
        Self::new(ErrorKind::UnsupportedOperandType {
            operator: operator.into(),
            value_type,
        })
    }

    /// Creates an unknown context key error.
    #[must_use]
    pub fn unknown_context_key(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownContextKey(key.into()))
    }

    /// Creates a missing context entry error.
    #[must_use]
    pub fn missing_context_entry(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingContextEntry(name.into()))
    }

    /// Creates an invalid command error.
    #[must_use]
    pub fn invalid_command(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCommand {
            command: command.into(),
            reason: reason.into(),
        })
    }

    /// Creates a missing binding error.
    #[must_use]
    pub fn missing_binding(role: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingBinding(role.into()))
    }
}

fn context_suffix(context: &Option<ErrorContext>) -> String {
    context
        .as_ref()
        .map(|c| format!(" ({c})"))
        .unwrap_or_default()
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Statement does not have the `<context> IF <predicate>` shape.
    #[error("statement does not match the required pattern: {statement:?} (pattern: {pattern})")]
    MalformedStatement {
        /// The offending statement.
        statement: String,
        /// The grammar it failed to match.
        pattern: &'static str,
    },

    /// Context clause is not `ACTION <name> IS BLOCKED [BY ACTION <name>]`.
    #[error("context does not match the required pattern: {context:?} (pattern: {pattern})")]
    MalformedContext {
        /// The offending context substring.
        context: String,
        /// The grammar it failed to match.
        pattern: &'static str,
    },

    /// Predicate is not a connector-joined sequence of clauses.
    #[error("predicate does not match the required pattern: {predicate:?}: {message} (pattern: {pattern})")]
    MalformedPredicate {
        /// The offending predicate substring.
        predicate: String,
        /// The grammar it failed to match.
        pattern: &'static str,
        /// What went wrong, and where.
        message: String,
    },

    /// Token is not `AND`, `OR`, `AND NOT` or `OR NOT`.
    #[error("invalid connector: {0:?}")]
    InvalidConnector(String),

    /// Token is neither a literal nor an action reference.
    #[error("not a valid operand: {0:?}")]
    InvalidOperand(String),

    /// Token is not in the operator vocabulary.
    #[error("unknown operator: {0:?}")]
    UnknownOperator(String),

    /// Operator does not accept operands of this kind.
    #[error("operator {operator} does not support operands of type {value_type}")]
    UnsupportedOperandType {
        /// The operator text.
        operator: String,
        /// The rejected operand kind.
        value_type: ValueType,
    },

    /// The two operands of a clause have different kinds.
    #[error("operands are of incompatible type: {left} and {right}")]
    IncompatibleOperandTypes {
        /// Kind of the first operand.
        left: ValueType,
        /// Kind of the second operand.
        right: ValueType,
    },

    /// A predicate token arrived in a state that cannot accept it.
    #[error("unexpected predicate token {token:?} in state {state}")]
    UnexpectedToken {
        /// Name of the builder state.
        state: &'static str,
        /// The rejected token.
        token: String,
    },

    /// A predicate token was empty.
    #[error("predicate token may not be empty")]
    EmptyToken,

    /// The predicate stopped in the middle of a clause.
    #[error("incomplete predicate")]
    IncompletePredicate,

    /// An operation was called before its precondition held.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// A declared context name was rejected.
    #[error("invalid context mapping {key} -> {name:?}: {reason}")]
    InvalidContextMapping {
        /// The slot key (`entry1` / `entry2`).
        key: String,
        /// The declared name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A declared context has no action bound to it.
    #[error("missing required {0} context")]
    MissingBinding(String),

    /// A clause references a context name that was not declared.
    #[error("missing required action context entry: {0}")]
    MissingContextEntry(String),

    /// A lookup found nothing under this key.
    #[error("unknown context key: {0}")]
    UnknownContextKey(String),

    /// A comparison received a value of the wrong kind.
    #[error("value kind mismatch: expected {expected}, got {actual}")]
    ValueKindMismatch {
        /// The kind the operator was built for.
        expected: ValueType,
        /// The kind it received.
        actual: ValueType,
    },

    /// Text is not a valid action literal.
    #[error("invalid action {text:?}: {reason}")]
    InvalidAction {
        /// The offending text.
        text: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A REPL command was not understood.
    #[error("invalid command {command}: {reason}")]
    InvalidCommand {
        /// The command word, e.g. `:eval`.
        command: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Reading a rule source failed.
    #[error("failed to read {path}: {message}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// The underlying error message.
        message: String,
    },
}

impl ErrorKind {
    /// Returns the taxonomy category of this kind.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedStatement { .. }
            | Self::MalformedContext { .. }
            | Self::MalformedPredicate { .. }
            | Self::InvalidConnector(_)
            | Self::InvalidAction { .. }
            | Self::InvalidCommand { .. } => ErrorCategory::Parse,
            Self::InvalidOperand(_) => ErrorCategory::Operand,
            Self::UnknownOperator(_)
            | Self::UnsupportedOperandType { .. }
            | Self::IncompatibleOperandTypes { .. } => ErrorCategory::Type,
            Self::UnexpectedToken { .. }
            | Self::EmptyToken
            | Self::IncompletePredicate
            | Self::PreconditionViolation(_) => ErrorCategory::BuilderState,
            Self::InvalidContextMapping { .. }
            | Self::MissingBinding(_)
            | Self::MissingContextEntry(_) => ErrorCategory::Binding,
            Self::UnknownContextKey(_) | Self::ValueKindMismatch { .. } => ErrorCategory::Eval,
            Self::Io { .. } => ErrorCategory::Io,
        }
    }
}

/// Coarse error taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Statement, context, or predicate grammar mismatch.
    Parse,
    /// Token is not a valid operand.
    Operand,
    /// Operand/operand or operator/operand kind mismatch.
    Type,
    /// Builder used out of order.
    BuilderState,
    /// Required binding missing or undeclared name referenced.
    Binding,
    /// Lookup failed during evaluation.
    Eval,
    /// Rule source could not be read.
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parse => "parse",
            Self::Operand => "operand",
            Self::Type => "type",
            Self::BuilderState => "builder state",
            Self::Binding => "binding",
            Self::Eval => "evaluation",
            Self::Io => "io",
        };
        f.write_str(name)
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Rule file or other source name.
    pub source: Option<String>,
    /// 1-based line number in source.
    pub line: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source, self.line) {
            (Some(source), Some(line)) => write!(f, "at {source}:{line}"),
            (Some(source), None) => write!(f, "at {source}"),
            (None, Some(line)) => write!(f, "at line {line}"),
            (None, None) => Ok(()),
        }
    }
}
