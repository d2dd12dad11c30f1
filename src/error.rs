//! Error types for the extraction service
//!
//! Validation and upstream-fetch failures map to `400 Bad Request` (a bad
//! or unreachable user-supplied URL is a client condition, not a server
//! fault); anything unexpected maps to `500 Internal Server Error`. Bodies
//! are JSON of the shape `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;

/// Convenience result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors surfaced by the extraction pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Input is not a parseable absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Upstream server answered with a non-2xx status.
    #[error("Failed to fetch URL: {status} {reason}")]
    FetchFailed {
        /// HTTP status code from the upstream response.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
    },

    /// The fetch did not complete within the configured window.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Any other failure: transport errors, processing panics caught at
    /// the handler boundary.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::InvalidUrl(_) => "invalid_url",
            ExtractError::FetchFailed { .. } => "fetch_failed",
            ExtractError::Timeout(_) => "timeout",
            ExtractError::Internal(_) => "internal",
        }
    }

    /// HTTP status this error maps to. Timeout is treated like a failed
    /// fetch; no distinct status is reserved for it.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExtractError::InvalidUrl(_)
            | ExtractError::FetchFailed { .. }
            | ExtractError::Timeout(_) => StatusCode::BAD_REQUEST,
            ExtractError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        counter!("extraction_errors_total", "type" => self.kind()).increment(1);

        let body = serde_json::json!({ "error": self.to_string() });
        (self.status_code(), Json(body)).into_response()
    }
}
