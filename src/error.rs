//! Error types for the VoltLab circuit engine.
//!
//! Only genuinely exceptional conditions are errors. Expected simulation
//! outcomes (no battery, an open switch, an open circuit, a failed solve)
//! are reported through [`SimulationStatus`](crate::circuit::SimulationStatus)
//! instead and never travel through this type.

use thiserror::Error;

/// Result type alias using [`VoltlabError`].
pub type Result<T> = std::result::Result<T, VoltlabError>;

/// Unified error type for all VoltLab operations.
#[derive(Error, Debug)]
pub enum VoltlabError {
    /// Matrix is singular and cannot be solved
    #[error("singular matrix - circuit may contain redundant or conflicting sources")]
    SingularMatrix,

    /// Linear system inputs have inconsistent dimensions
    #[error("dimension mismatch: matrix is {rows}x{cols} but rhs has length {rhs}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        rhs: usize,
    },
}
