//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status; `message` comes from the server's error
    /// body when parseable, otherwise synthesized from the status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Resource absent from both the direct lookup and the fallback scan
    #[error("{0}")]
    NotFound(String),

    /// Payload rejected before it was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request aborted through its cancellation token
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Whether this error denotes a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::NotFound(_) | ClientError::Api { status: 404, .. }
        )
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
