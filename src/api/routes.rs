//! API Routes
//!
//! Configures the Axum router with the cache management endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    entity_types_handler, flush_handler, health_handler, invalidate_entity_handler,
    invalidate_multiple_handler, stats_handler, AppState,
};

/// Creates the management router.
///
/// # Endpoints
/// - `GET /cache/health` - backend connectivity ping
/// - `GET /cache/stats` - cache counters and active backend
/// - `POST /cache/flush` - clear the entire namespace
/// - `POST /cache/invalidate/:entity_type` - clear one entity's keys
/// - `POST /cache/invalidate-multiple` - clear several entities' keys
/// - `GET /cache/entity-types` - list registered entity types
///
/// # Middleware
/// - CORS: allows any origin (configurable for production)
/// - Tracing: logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/cache/health", get(health_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/flush", post(flush_handler))
        .route("/cache/invalidate/:entity_type", post(invalidate_entity_handler))
        .route("/cache/invalidate-multiple", post(invalidate_multiple_handler))
        .route("/cache/entity-types", get(entity_types_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
