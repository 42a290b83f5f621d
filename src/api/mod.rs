//! API Module
//!
//! HTTP handlers and routing for the cache management API.
//!
//! # Endpoints
//! - `GET /cache/health` - backend connectivity ping
//! - `GET /cache/stats` - cache counters and active backend
//! - `POST /cache/flush` - clear the entire namespace
//! - `POST /cache/invalidate/:entity_type` - clear one entity's keys
//! - `POST /cache/invalidate-multiple` - clear several entities' keys
//! - `GET /cache/entity-types` - list registered entity types

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
