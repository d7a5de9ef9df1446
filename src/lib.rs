//! # VoltLab Core
//!
//! The circuit solving engine behind an educational electronics sandbox.
//!
//! The caller places electrical nodes and two-terminal components (batteries,
//! resistors, bulbs, switches, wires, meters) on a workspace; this crate
//! merges nearby connection points into shared electrical nodes, checks the
//! topology for a closed conducting loop, and solves the network with
//! Modified Nodal Analysis (MNA) for node voltages and branch currents.
//!
//! ## Architecture
//!
//! - [`circuit`] - the [`CircuitGraph`] arena, spatial node merging,
//!   closed-loop detection and the `simulate()` entry point
//! - [`components`] - the closed device catalogue with per-device state
//!   (bulb brightness and burnout, switch position, meter readings)
//! - [`solver`] - MNA matrix assembly and dense Gaussian elimination with
//!   partial pivoting
//! - [`error`] - error types for genuinely exceptional conditions
//!
//! ## Usage
//!
//! ```
//! use voltlab_core::{CircuitGraph, Component, Point, SimulationStatus};
//!
//! let mut graph = CircuitGraph::new();
//! let a = graph.add_node(Point::new(0.0, 0.0));
//! let b = graph.add_node(Point::new(200.0, 0.0));
//! let c = graph.add_node(Point::new(100.0, 150.0));
//!
//! graph.add_component(Component::battery("B1", a, b, 9.0));
//! graph.add_component(Component::wire("W1", b, c));
//! graph.add_component(Component::bulb("L1", c, a));
//!
//! let result = graph.simulate();
//! assert_eq!(result.status, SimulationStatus::Solved);
//! assert!((result.current - 9.0 / 101.0).abs() < 1e-6);
//! ```
//!
//! ## Simulation pipeline
//!
//! Every `simulate()` call runs the same ordered checks, each short-circuiting
//! the rest:
//!
//! 1. A battery must be present (`NoBattery` otherwise)
//! 2. Every switch must be closed (`SwitchOpen`, naming the switch)
//! 3. A closed conducting loop must exist, found by DFS over conducting
//!    components (`OpenCircuit`; bulbs are forced dark)
//! 4. The MNA system must solve; a singular matrix is reported as a failed
//!    solve, never a crash
//!
//! On success, branch currents are written back into component state: bulbs
//! recompute brightness and may burn out, meters latch readings.

pub mod circuit;
pub mod components;
pub mod error;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{
    CircuitGraph, ComponentDetail, ComponentId, NodeId, Point, SimulationResult, SimulationStatus,
    VoltageDrop,
};
pub use components::{Component, ComponentKind};
pub use error::{Result, VoltlabError};
