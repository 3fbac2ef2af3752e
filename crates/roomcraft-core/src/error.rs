//! Core domain errors.

use thiserror::Error;

/// Core domain errors for Roomcraft.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Render job not found.
    #[error("Render job not found: {0}")]
    JobNotFound(String),

    /// Design not found.
    #[error("Design not found: {0}")]
    DesignNotFound(String),

    /// Room not found.
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// Invalid job state transition.
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
