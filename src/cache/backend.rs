//! Cache Backend Trait
//!
//! Strategy interface hiding the choice between the in-process memory store
//! and the remote Redis adapter. The service holds the active backend as an
//! `Arc<dyn CacheBackend>` and swaps it at most once on terminal connection
//! failure.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

// == Backend Kind ==
/// Identifies which backend implementation is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    Redis,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::Redis => "redis",
        }
    }
}

// == Cache Backend Trait ==
/// Common contract for cache storage backends.
///
/// Values are JSON payloads; each backend owns its entries exclusively and
/// serializes values into its own representation on write.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the stored value, or None if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores a value with optional TTL in seconds (None = never expires).
    async fn set(&self, key: &str, value: &Value, ttl_seconds: Option<u64>) -> Result<()>;

    /// Removes a key; returns whether it was present.
    async fn del(&self, key: &str) -> Result<bool>;

    /// Returns all keys matching a glob pattern (`*` wildcard, every other
    /// character literal).
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;

    /// Deletes all keys matching a glob pattern; returns the removed count.
    ///
    /// Patterns are always namespace-scoped by the caller; backends never
    /// perform a global flush of shared storage.
    async fn flush_pattern(&self, pattern: &str) -> Result<usize>;

    /// Connectivity check.
    async fn ping(&self) -> Result<()>;

    /// Which implementation this is.
    fn kind(&self) -> BackendKind;
}
