//! Connectors joining consecutive clauses.

use std::fmt;

use cdl_foundation::{Error, ErrorKind, Result};

/// The boolean join of a connector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    /// `AND`
    And,
    /// `OR`
    Or,
}

/// Joins a clause to the running result of the clauses before it.
///
/// A negated connector (`AND NOT`, `OR NOT`) inverts the result of the
/// clause it introduces, not the running result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Connector {
    /// `AND` or `OR`.
    pub kind: ConnectorKind,
    /// True for the `NOT` suffix.
    pub negated: bool,
}

impl Connector {
    /// `AND`
    pub const AND: Self = Self::new(ConnectorKind::And, false);
    /// `OR`
    pub const OR: Self = Self::new(ConnectorKind::Or, false);
    /// `AND NOT`
    pub const AND_NOT: Self = Self::new(ConnectorKind::And, true);
    /// `OR NOT`
    pub const OR_NOT: Self = Self::new(ConnectorKind::Or, true);

    /// Creates a connector.
    #[must_use]
    pub const fn new(kind: ConnectorKind, negated: bool) -> Self {
        Self { kind, negated }
    }

    /// Parses `AND`, `OR`, `AND NOT` or `OR NOT`.
    ///
    /// # Errors
    /// Returns `InvalidConnector` for any other token.
    pub fn parse(token: &str) -> Result<Self> {
        let words: Vec<&str> = token.split_whitespace().collect();
        match words.as_slice() {
            ["AND"] => Ok(Self::AND),
            ["OR"] => Ok(Self::OR),
            ["AND", "NOT"] => Ok(Self::AND_NOT),
            ["OR", "NOT"] => Ok(Self::OR_NOT),
            _ => Err(Error::new(ErrorKind::InvalidConnector(token.to_string()))),
        }
    }

    /// Folds `clause` into the running result `acc`.
    #[must_use]
    pub const fn apply(self, acc: bool, clause: bool) -> bool {
        let clause = clause != self.negated;
        match self.kind {
            ConnectorKind::And => acc && clause,
            ConnectorKind::Or => acc || clause,
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.kind {
            ConnectorKind::And => "AND",
            ConnectorKind::Or => "OR",
        };
        if self.negated {
            write!(f, "{base} NOT")
        } else {
            f.write_str(base)
        }
    }
}
