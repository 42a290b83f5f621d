//! Write-Path Invalidation Middleware
//!
//! Drops entity caches after a successful mutation. Invalidation failures
//! are logged and never surfaced: the mutation already succeeded, and cache
//! incoherence self-heals via TTL expiry.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::cache::CacheService;
use crate::middleware::is_mutating;

// == Write Invalidate Config ==
/// Per-route configuration for the write path.
#[derive(Clone)]
pub struct WriteInvalidateConfig {
    pub service: Arc<CacheService>,
    /// Entity types this route mutates; each one's full invalidation unit
    /// (type plus registered companions) is dropped
    pub entity_types: Vec<&'static str>,
}

impl WriteInvalidateConfig {
    pub fn new(service: Arc<CacheService>, entity_types: Vec<&'static str>) -> Self {
        Self {
            service,
            entity_types,
        }
    }
}

// == Middleware ==
/// Write-path middleware entry point; only activates on mutating methods.
pub async fn invalidate_on_write(
    State(config): State<WriteInvalidateConfig>,
    request: Request,
    next: Next,
) -> Response {
    run_write_path(&config, request, next).await
}

pub(crate) async fn run_write_path(
    config: &WriteInvalidateConfig,
    request: Request,
    next: Next,
) -> Response {
    if !is_mutating(request.method()) {
        return next.run(request).await;
    }

    let response = next.run(request).await;

    // Non-2xx means the mutation did not take effect; keep the cache
    if response.status().is_success() {
        let mut removed = 0;
        for entity_type in &config.entity_types {
            removed += config.service.invalidate_unit(entity_type).await;
        }
        debug!(
            entities = ?config.entity_types,
            removed,
            "entity caches invalidated after mutation"
        );
    }

    response
}
