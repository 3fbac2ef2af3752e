//! Error types for the agent streaming SDK.

use thiserror::Error;

/// Errors that can occur inside the agent SDK.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A procurement step failed in the underlying source.
    #[error("Procurement step failed: {0}")]
    Step(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The event channel closed while a session was still producing.
    #[error("Event channel closed")]
    ChannelClosed,
}
