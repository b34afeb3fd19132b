//! API response types
//!
//! The backend speaks plain JSON: collections and records are returned
//! bare, errors carry a single `message` field.

use serde::{Deserialize, Serialize};

/// Error payload returned by the backend on non-success statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
