//! The predicate parsing state machine.

use std::fmt;

/// Which predicate token the builder expects next.
///
/// States cycle `Operand1 -> Operator -> Operand2 -> Connector -> Operand1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PredicateState {
    /// Left operand of a clause.
    #[default]
    Operand1,
    /// Operator phrase.
    Operator,
    /// Right operand of a clause.
    Operand2,
    /// Connector to the next clause.
    Connector,
}

impl PredicateState {
    /// Returns the state after consuming one token.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Operand1 => Self::Operator,
            Self::Operator => Self::Operand2,
            Self::Operand2 => Self::Connector,
            Self::Connector => Self::Operand1,
        }
    }

    /// Returns true if the machine may stop here.
    ///
    /// `Operand1` is terminal only for an empty chain, which validation
    /// rejects separately.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Operand1 | Self::Connector)
    }

    /// Returns a short name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Operand1 => "operand1",
            Self::Operator => "operator",
            Self::Operand2 => "operand2",
            Self::Connector => "connector",
        }
    }
}

impl fmt::Display for PredicateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
