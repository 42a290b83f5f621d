//! Storefront Cache - read-through response cache for the storefront API
//!
//! Provides a pluggable cache façade (Redis with in-memory fallback),
//! per-entity TTL policy, pattern-based invalidation, and axum middleware
//! for cache-on-GET / invalidate-on-mutation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::CacheService;
pub use config::Config;
pub use tasks::{spawn_reaper_task, spawn_remote_supervisor};
