//! Error types for the catalog service
//!
//! Provides unified error handling using thiserror. Only [`AppError`] ever
//! reaches an HTTP client; remote and storage failures are absorbed by the
//! catalog cache and the image helpers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == App Error Enum ==
/// Errors surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// No machine with this id in the catalog
    #[error("Machine not found: {0}")]
    NotFound(String),

    /// Machine has no stored image, or it couldn't be signed
    #[error("No image for machine: {0}")]
    ImageNotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) | AppError::ImageNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Remote Error Enum ==
/// Failures talking to the remote table or the object store.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Store URL or key missing from configuration
    #[error("remote store is not configured")]
    NotConfigured,

    /// Transport-level failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status from the store
    #[error("remote store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body didn't match the expected shape
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Query succeeded but returned no rows
    #[error("no machines found in database")]
    Empty,

    /// Signing call succeeded without a URL
    #[error("no signed URL returned for {0}")]
    MissingSignedUrl(String),
}

// == Storage Error Enum ==
/// Failures reading or writing the local snapshot slot.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_status_codes() {
        let resp = AppError::NotFound("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::InvalidRequest("bad".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::ImageNotFound("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_remote_error_messages() {
        assert_eq!(
            RemoteError::Status {
                status: 503,
                body: "down".to_string()
            }
            .to_string(),
            "remote store returned 503: down"
        );
        assert_eq!(RemoteError::Empty.to_string(), "no machines found in database");
    }
}
