//! Core identifier and geometry types for circuit representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stable identifier for a node owned by a [`CircuitGraph`](super::CircuitGraph).
///
/// Nodes live in an arena inside the graph; ids are indices into it and are
/// never reused while the graph is alive. Two components whose placement
/// points were merged end up holding the same `NodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A stable identifier for a component owned by a [`CircuitGraph`](super::CircuitGraph).
///
/// Components are kept in insertion order; the id is the index into that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// A 2D placement point on the workspace grid.
///
/// Positions double as electrical identity: points closer than the graph's
/// merge radius are collapsed into a single node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn ids_display() {
        assert_eq!(NodeId(3).to_string(), "N3");
        assert_eq!(ComponentId(7).to_string(), "C7");
    }
}
