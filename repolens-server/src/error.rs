//! API error type and HTTP status mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to API callers.
///
/// Each variant maps to one HTTP status; the display string becomes the
/// `error` field of the JSON body. Messages carry context but never more
/// than the underlying error's own display form.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input (400).
    #[error("{0}")]
    Validation(String),

    /// A remote resource was absent (404).
    #[error("{0}")]
    NotFound(String),

    /// A file exceeded the configured size ceiling (413).
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The hosting API or the model API failed (500).
    #[error("{0}")]
    Upstream(String),

    /// Unexpected local fault (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(status = %self.status_code(), error = %self, "request failed");
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
