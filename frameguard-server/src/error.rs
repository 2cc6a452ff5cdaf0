//! API error handling module
//!
//! Provides a unified error type for all API endpoints. Every failure is
//! reported to clients in the generic envelope `{"error": message}`; internal
//! details go to the logs, not the wire.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::storage::StorageError;

/// API error type covering client errors, storage failures, and core
/// pipeline failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request - client provided invalid or missing input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found - requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Forbidden - presigned URL expired or signature invalid
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal server error - unexpected server-side failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Frameguard core error - decode/encode/manifest/pipeline failure
    #[error("{0}")]
    Core(#[from] frameguard_core::Error),

    /// Object storage error
    #[error("{0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // Every core-raised failure surfaces as one generic 500; tamper
            // detection itself is a 200 and never reaches this type.
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,

            Self::Storage(ref e) => match e {
                StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
                StorageError::InvalidKey(_) => StatusCode::BAD_REQUEST,
                StorageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Get the error category for logging
    fn error_category(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Forbidden(_) => "forbidden",
            Self::Internal(_) => "internal",
            Self::Core(_) => "core",
            Self::Storage(_) => "storage",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.error_category();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                category = category,
                error = %message,
                "Server error"
            );
        } else {
            tracing::warn!(
                status = %status,
                category = category,
                error = %message,
                "Client error"
            );
        }

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_classes() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(frameguard_core::Error::decode("bad container")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(StorageError::NotFound { key: "k".into() }).status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
