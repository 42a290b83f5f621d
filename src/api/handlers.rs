//! API Handlers
//!
//! HTTP request handlers for the cache management endpoints. Authentication
//! of these endpoints is delegated to the external auth middleware.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{registry, CacheService};
use crate::error::{CacheError, Result};
use crate::models::{
    EntityTypeInfo, EntityTypesResponse, FlushResponse, HealthResponse, InvalidateMultipleRequest,
    InvalidateResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache service façade
    pub cache: Arc<CacheService>,
}

impl AppState {
    /// Creates a new AppState with the given cache service.
    pub fn new(cache: Arc<CacheService>) -> Self {
        Self { cache }
    }
}

/// Handler for GET /cache/health
///
/// Pings the active backend and reports which one is serving.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let reachable = state.cache.ping().await;
    let backend = state.cache.active_backend_kind().await;

    Json(HealthResponse::new(reachable, backend))
}

/// Handler for GET /cache/stats
///
/// Returns the counter snapshot plus the active backend kind.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let backend = state.cache.active_backend_kind().await;

    Json(StatsResponse::new(state.cache.stats(), backend))
}

/// Handler for POST /cache/flush
///
/// Clears every key under this system's namespace prefix.
pub async fn flush_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    let removed = state.cache.flush_all().await;

    Json(FlushResponse::new(removed))
}

/// Handler for POST /cache/invalidate/:entity_type
///
/// Drops one entity's keys (companions included). Unknown names are
/// rejected with a 400 listing the valid types.
pub async fn invalidate_entity_handler(
    State(state): State<AppState>,
    Path(entity_type): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    if !registry::is_registered(&entity_type) {
        return Err(CacheError::UnknownEntityType(entity_type));
    }

    let unit: Vec<String> = registry::invalidation_unit(&entity_type)
        .iter()
        .map(|s| s.to_string())
        .collect();
    let removed = state.cache.invalidate_unit(&entity_type).await;

    Ok(Json(InvalidateResponse::new(unit, removed)))
}

/// Handler for POST /cache/invalidate-multiple
///
/// Drops several entities' keys. Every name is validated before any
/// invalidation runs.
pub async fn invalidate_multiple_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateMultipleRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    for entity_type in &req.entity_types {
        if !registry::is_registered(entity_type) {
            return Err(CacheError::UnknownEntityType(entity_type.clone()));
        }
    }

    let mut removed = 0;
    let mut dropped: Vec<String> = Vec::new();
    for entity_type in &req.entity_types {
        removed += state.cache.invalidate_unit(entity_type).await;
        dropped.extend(
            registry::invalidation_unit(entity_type)
                .iter()
                .map(|s| s.to_string()),
        );
    }

    Ok(Json(InvalidateResponse::new(dropped, removed)))
}

/// Handler for GET /cache/entity-types
///
/// Lists the registered entity types with their TTLs.
pub async fn entity_types_handler() -> Json<EntityTypesResponse> {
    let entity_types = registry::ENTITY_CONFIGS
        .iter()
        .map(|config| EntityTypeInfo {
            name: config.entity_type,
            ttl_seconds: config.ttl_seconds,
        })
        .collect();

    Json(EntityTypesResponse { entity_types })
}
