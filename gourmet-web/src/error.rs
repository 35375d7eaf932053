//! Error types for gourmet-web
//!
//! Maps the service error taxonomy onto HTTP responses. Store and internal
//! failures are logged server-side and surfaced with a generic message so
//! no internal detail leaks to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::services::draft_client::DraftError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Missing/invalid/expired credential (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Conflict (409) - e.g., slug retry budget exhausted
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Upstream provider failure (502)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Feature not configured (503)
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Internal server error (500); details stay server-side
    #[error("Internal server error")]
    Internal(String),
}

impl From<gourmet_common::Error> for ApiError {
    fn from(err: gourmet_common::Error) -> Self {
        use gourmet_common::Error;

        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::Conflict(msg) => ApiError::Conflict(msg),
            Error::Database(_) | Error::Io(_) | Error::Config(_) | Error::Internal(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<DraftError> for ApiError {
    fn from(err: DraftError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", msg),
            ApiError::Internal(detail) => {
                // Log the detail, surface a generic message
                error!("internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
