//! Error types for the Roomcraft client.

use thiserror::Error;

/// Errors that can occur when using the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API rejected the request before any stream content was read.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
