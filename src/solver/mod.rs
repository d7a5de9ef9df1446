//! MNA (Modified Nodal Analysis) solver.
//!
//! This module provides the numerical engine behind
//! [`CircuitGraph::simulate`](crate::circuit::CircuitGraph::simulate).
//!
//! ## Modified Nodal Analysis
//!
//! MNA assembles a system of equations Ax = z where:
//! - x contains node voltages and branch currents
//! - A is the conductance/coefficient matrix
//! - z is the source vector
//!
//! The matrix structure is:
//! ```text
//! [ G   B ] [ v ]   [ i ]
//! [ C   D ] [ j ] = [ e ]
//! ```
//!
//! where:
//! - G is the conductance matrix (node equations)
//! - B, C connect voltage sources (batteries) to nodes
//! - D is 0 for the ideal sources modeled here
//! - v is the vector of node voltages (ground eliminated)
//! - j is the vector of battery branch currents
//! - e is the vector of battery voltages
//!
//! The system is solved by dense Gaussian elimination with partial pivoting
//! ([`linear`]); at sandbox sizes (tens of nodes) sparsity is not worth
//! exploiting, but the pivoting rule is mandatory for stability.

pub mod linear;
pub mod mna;

pub use linear::solve_dense;
pub use mna::{solve_circuit, MnaMatrix, MnaSolution};

/// Pivot magnitudes below this are treated as singular.
pub const PIVOT_EPSILON: f64 = 1e-15;
