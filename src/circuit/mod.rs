//! Circuit graph representation and simulation results.
//!
//! [`CircuitGraph`] owns the node arena and the component list and exposes
//! the whole public workflow: placing nodes and components, loop detection,
//! and `simulate()`.

mod graph;
mod result;
mod types;

pub use graph::{CircuitGraph, Node};
pub use result::{ComponentDetail, SimulationResult, SimulationStatus, VoltageDrop};
pub use types::{ComponentId, NodeId, Point};
