//! Error types for the simulation engine.
//!
//! Only caller mistakes are represented here. Broken internal invariants
//! (out-of-bounds coordinates, empty selections, lock misuse) panic instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The start request asks for more entities than the grid has cells.
    #[error("Too many entities")]
    TooManyEntities { requested: u64, capacity: usize },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Whether the error was caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, SimError::TooManyEntities { .. })
    }
}
