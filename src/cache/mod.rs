//! Cache Module
//!
//! Storage backends, the service façade, the entity registry, and statistics.

mod backend;
mod entry;
mod memory;
pub mod registry;
mod remote;
mod service;
mod stats;


// Re-export public types
pub use backend::{BackendKind, CacheBackend};
pub use entry::CacheEntry;
pub use memory::MemoryBackend;
pub use remote::RedisBackend;
pub use service::{CacheService, CachedValue};
pub use stats::{CacheStatistics, StatsSnapshot};
