//! Grid occupancy queries.

use std::collections::HashSet;

use cdl_foundation::Vertex;

/// Answers whether a grid cell can be moved into.
///
/// Implemented by the simulation layer over its walls and agent positions.
pub trait Occupancy {
    /// Returns true if nothing occupies `vertex`.
    fn is_free(&self, vertex: Vertex) -> bool;
}

/// An empty grid: every cell is free.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObstacles;

impl Occupancy for NoObstacles {
    fn is_free(&self, _vertex: Vertex) -> bool {
        true
    }
}

/// A set of occupied cells.
impl Occupancy for HashSet<Vertex> {
    fn is_free(&self, vertex: Vertex) -> bool {
        !self.contains(&vertex)
    }
}

impl<F> Occupancy for F
where
    F: Fn(Vertex) -> bool,
{
    fn is_free(&self, vertex: Vertex) -> bool {
        self(vertex)
    }
}
