//! Unified error type
//!
//! [`AppError`] carries an [`ErrorCode`] plus a human-readable message
//! and maps onto HTTP responses for the mock backend. The wire shape of
//! an error body is `{"message": "..."}` (see [`crate::response`]).

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

use crate::response::ErrorBody;

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Validation,
    Unauthorized,
    NotFound,
    Internal,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Application error with code and message
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create a not found error for a resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, format!("{} not found", resource.into()))
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.http_status(), Json(ErrorBody::new(self.message))).into_response()
    }
}

/// Result type for fallible application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::not_found("Product 3").http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::unauthorized("bad credentials").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::validation("oops").http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_names_resource() {
        let err = AppError::not_found("Product 42");
        assert_eq!(err.message, "Product 42 not found");
    }
}
