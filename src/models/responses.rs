//! Response DTOs for the cache management API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{BackendKind, StatsSnapshot};

/// Response body for GET /cache/health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status ("healthy" when the active backend answers a ping)
    pub status: String,
    /// Active backend kind
    pub backend: BackendKind,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn new(reachable: bool, backend: BackendKind) -> Self {
        Self {
            status: if reachable { "healthy" } else { "degraded" }.to_string(),
            backend,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Counter snapshot
    #[serde(flatten)]
    pub stats: StatsSnapshot,
    /// Active backend kind
    pub backend: BackendKind,
}

impl StatsResponse {
    pub fn new(stats: StatsSnapshot, backend: BackendKind) -> Self {
        Self { stats, backend }
    }
}

/// Response body for POST /cache/flush
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Success message
    pub message: String,
    /// Number of keys removed
    pub removed: usize,
}

impl FlushResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Cache flushed, {} keys removed", removed),
            removed,
        }
    }
}

/// Response body for the invalidation endpoints
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    /// Entity types whose caches were dropped (companions included)
    pub entity_types: Vec<String>,
    /// Number of keys removed
    pub removed: usize,
}

impl InvalidateResponse {
    pub fn new(entity_types: Vec<String>, removed: usize) -> Self {
        Self {
            message: format!("{} keys invalidated", removed),
            entity_types,
            removed,
        }
    }
}

/// One registered entity type with its TTL, for GET /cache/entity-types
#[derive(Debug, Clone, Serialize)]
pub struct EntityTypeInfo {
    pub name: &'static str,
    pub ttl_seconds: u64,
}

/// Response body for GET /cache/entity-types
#[derive(Debug, Clone, Serialize)]
pub struct EntityTypesResponse {
    pub entity_types: Vec<EntityTypeInfo>,
}
