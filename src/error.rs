//! Error types for the cache service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cache::registry;

// == Cache Error Enum ==
/// Unified error type for the cache service.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The active backend failed to execute an operation
    #[error("Backend error: {0}")]
    Backend(String),

    /// A value could not be serialized to or from the wire format
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A management endpoint was called with an unregistered entity type
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        match &self {
            // Operator mistake on a management endpoint: reject with the
            // list of valid names.
            CacheError::UnknownEntityType(name) => {
                let body = Json(json!({
                    "error": format!("Unknown entity type: {}", name),
                    "validEntityTypes": registry::registered_entities(),
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            CacheError::InvalidRequest(msg) => {
                let body = Json(json!({ "error": msg }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            other => {
                let body = Json(json!({ "error": other.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache service.
pub type Result<T> = std::result::Result<T, CacheError>;
