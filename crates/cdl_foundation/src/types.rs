//! Value kinds for static typing of clauses.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of value an operand produces.
///
/// Every operand has exactly one kind, fixed when it is parsed. A clause is
/// well-typed only when both operands share a kind that its operator supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueType {
    /// Text, e.g. an action name such as `Move(N)`.
    String,
    /// Fixed-width signed integer (time ticks, agent ids, literals).
    Number,
    /// A grid coordinate `(row, col)`.
    Vertex,
    /// An ordered `(origin, destination)` pair of vertices.
    Edge,
}

impl ValueType {
    /// All value kinds, in declaration order.
    pub const ALL: [ValueType; 4] = [Self::String, Self::Number, Self::Vertex, Self::Edge];

    /// Returns the lowercase name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Vertex => "vertex",
            Self::Edge => "edge",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
