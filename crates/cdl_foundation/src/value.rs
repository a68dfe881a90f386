//! Values compared by CDL clauses.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::ValueType;

/// A grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Row index.
    pub row: i32,
    /// Column index.
    pub col: i32,
}

impl Vertex {
    /// Creates a vertex at `(row, col)`.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<(i32, i32)> for Vertex {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// An ordered pair of vertices traversed by one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Where the action starts.
    pub origin: Vertex,
    /// Where the action ends.
    pub destination: Vertex,
}

impl Edge {
    /// Creates an edge from `origin` to `destination`.
    #[must_use]
    pub const fn new(origin: Vertex, destination: Vertex) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Returns true if any endpoint of `self` equals any endpoint of `other`.
    ///
    /// Symmetric but not transitive: edges that only touch at one vertex
    /// overlap. A stationary edge (origin == destination) overlaps every
    /// edge that touches its single vertex, itself included.
    #[must_use]
    pub fn overlaps(&self, other: &Edge) -> bool {
        self.origin == other.origin
            || self.destination == other.origin
            || self.origin == other.destination
            || self.destination == other.destination
    }

    /// Returns true if origin and destination coincide.
    #[must_use]
    pub fn is_stationary(&self) -> bool {
        self.origin == self.destination
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.destination)
    }
}

/// A runtime value produced by an operand.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Text value.
    String(String),
    /// Integer value.
    Number(i64),
    /// Coordinate value.
    Vertex(Vertex),
    /// Coordinate pair value.
    Edge(Edge),
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Number(_) => ValueType::Number,
            Self::Vertex(_) => ValueType::Vertex,
            Self::Edge(_) => ValueType::Edge,
        }
    }

    /// Returns the string if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is a number value.
    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the vertex if this is a vertex value.
    #[must_use]
    pub const fn as_vertex(&self) -> Option<Vertex> {
        match self {
            Self::Vertex(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the edge if this is an edge value.
    #[must_use]
    pub const fn as_edge(&self) -> Option<Edge> {
        match self {
            Self::Edge(e) => Some(*e),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "'{s}'"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Vertex(v) => write!(f, "{v}"),
            Self::Edge(e) => write!(f, "{e}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<Vertex> for Value {
    fn from(v: Vertex) -> Self {
        Self::Vertex(v)
    }
}

impl From<Edge> for Value {
    fn from(e: Edge) -> Self {
        Self::Edge(e)
    }
}
