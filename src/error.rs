//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the cache server.
///
/// Not-found and invalid-argument conditions are ordinary negative
/// results surfaced to the caller; internal inconsistencies are prevented
/// by construction and have no variant here.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key absent or logically expired at lookup time
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Missing or malformed request parameter
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The store cannot serve requests
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            StoreError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            StoreError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            StoreError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, StoreError>;
