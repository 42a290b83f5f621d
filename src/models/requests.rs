//! Request DTOs for the cache management API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for POST /cache/invalidate-multiple
///
/// # Fields
/// - `entity_types`: the entity types whose caches should be dropped
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateMultipleRequest {
    /// Entity types to invalidate
    #[serde(rename = "entityTypes")]
    pub entity_types: Vec<String>,
}

impl InvalidateMultipleRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.entity_types.is_empty() {
            return Some("entityTypes cannot be empty".to_string());
        }
        None
    }
}
