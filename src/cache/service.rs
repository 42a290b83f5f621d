//! Cache Service Module
//!
//! Single entry point hiding the backend choice from all callers. Owns key
//! construction, TTL policy lookup, statistics, and pattern invalidation.
//!
//! The cache is strictly best-effort: every public method swallows backend
//! errors and degrades to a safe default (miss on read failure, false on
//! write failure, zero on invalidation failure). A cache problem must never
//! become a user-facing request failure.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::backend::{BackendKind, CacheBackend};
use crate::cache::memory::MemoryBackend;
use crate::cache::registry;
use crate::cache::stats::{CacheStatistics, StatsSnapshot};
use crate::config::Config;

// == Cached Value ==
/// Result of a read-through lookup: the data plus where it came from.
#[derive(Debug, Clone)]
pub struct CachedValue {
    pub data: Value,
    pub from_cache: bool,
}

// == Cache Service ==
/// Façade over the active storage backend.
pub struct CacheService {
    /// Currently active backend; read per call, swapped at most once on
    /// terminal remote failure
    active: RwLock<Arc<dyn CacheBackend>>,
    /// In-process fallback, always available
    memory: Arc<MemoryBackend>,
    /// Process-lifetime counters
    stats: CacheStatistics,
    /// Key namespace prefix
    prefix: String,
    /// System-wide default TTL in seconds
    default_ttl: u64,
    /// Set once the remote backend has been abandoned
    fell_back: AtomicBool,
}

impl CacheService {
    // == Constructor ==
    /// Creates a service starting on the memory backend. The remote backend
    /// is installed later by the connection supervisor if it comes up.
    pub fn new(config: &Config) -> Arc<Self> {
        let memory = Arc::new(MemoryBackend::new(config.max_entries));

        Arc::new(Self {
            active: RwLock::new(memory.clone() as Arc<dyn CacheBackend>),
            memory,
            stats: CacheStatistics::new(),
            prefix: config.cache_prefix.clone(),
            default_ttl: config.default_ttl,
            fell_back: AtomicBool::new(false),
        })
    }

    /// The in-process backend, for the expired-entry reaper.
    pub fn memory_backend(&self) -> Arc<MemoryBackend> {
        self.memory.clone()
    }

    /// Swaps in a newly connected backend.
    pub async fn install_backend(&self, backend: Arc<dyn CacheBackend>) {
        let kind = backend.kind();
        *self.active.write().await = backend;
        info!(backend = kind.as_str(), "cache backend installed");
    }

    /// Kind of the currently active backend.
    pub async fn active_backend_kind(&self) -> BackendKind {
        self.active.read().await.kind()
    }

    async fn backend(&self) -> Arc<dyn CacheBackend> {
        self.active.read().await.clone()
    }

    /// Falls back to the memory backend after a remote failure. Runs at
    /// most once per process lifetime; later remote errors are only logged.
    async fn note_backend_failure(&self, failed: BackendKind) {
        if failed == BackendKind::Redis && !self.fell_back.swap(true, Ordering::SeqCst) {
            *self.active.write().await = self.memory.clone();
            warn!("remote cache backend failed; falling back to memory backend for the rest of the process lifetime");
        }
    }

    // == Key Generation ==
    /// Builds a deterministic, namespaced key: `prefix:entityType:identifier`.
    ///
    /// Non-alphanumeric characters are stripped from the identifier so
    /// request paths and query strings stay safe for backend key spaces.
    /// All keys of one entity type share the `prefix:entityType:` prefix,
    /// which is what makes pattern invalidation possible.
    pub fn generate_key(&self, entity_type: &str, identifier: &str) -> String {
        let cleaned: String = identifier
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        format!("{}:{}:{}", self.prefix, entity_type, cleaned)
    }

    // == Get ==
    /// Looks up a key on the active backend. Backend errors are treated as
    /// misses.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.stats.record_request();
        let backend = self.backend().await;

        match backend.get(key).await {
            Ok(Some(value)) => {
                self.stats.record_hit();
                Some(value)
            }
            Ok(None) => {
                self.stats.record_miss();
                None
            }
            Err(err) => {
                warn!(key, error = %err, "cache get failed; treating as miss");
                self.note_backend_failure(backend.kind()).await;
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a value; TTL falls back to the system default when not given.
    /// Returns false instead of erroring on backend failure.
    pub async fn set(&self, key: &str, value: &Value, ttl_seconds: Option<u64>) -> bool {
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);
        let backend = self.backend().await;

        match backend.set(key, value, Some(ttl)).await {
            Ok(()) => {
                self.stats.record_set();
                true
            }
            Err(err) => {
                warn!(key, error = %err, "cache set failed");
                self.note_backend_failure(backend.kind()).await;
                false
            }
        }
    }

    // == Delete ==
    /// Removes a single key; returns whether it was present.
    pub async fn del(&self, key: &str) -> bool {
        let backend = self.backend().await;

        match backend.del(key).await {
            Ok(removed) => {
                if removed {
                    self.stats.record_delete();
                }
                removed
            }
            Err(err) => {
                warn!(key, error = %err, "cache delete failed");
                self.note_backend_failure(backend.kind()).await;
                false
            }
        }
    }

    // == Invalidate Entity ==
    /// Drops every key under `prefix:entityType:*`. Returns the number of
    /// keys removed, zero on failure.
    pub async fn invalidate_entity(&self, entity_type: &str) -> usize {
        let pattern = format!("{}:{}:*", self.prefix, entity_type);
        let backend = self.backend().await;

        match backend.flush_pattern(&pattern).await {
            Ok(removed) => {
                self.stats.record_invalidation();
                debug!(entity_type, removed, "entity cache invalidated");
                removed
            }
            Err(err) => {
                warn!(entity_type, error = %err, "entity invalidation failed");
                self.note_backend_failure(backend.kind()).await;
                0
            }
        }
    }

    // == Invalidate Multiple ==
    /// Invalidates several entity types concurrently. Each type runs
    /// independently, so one failure never blocks the others; counts are
    /// summed.
    pub async fn invalidate_multiple(&self, entity_types: &[&str]) -> usize {
        let results = join_all(
            entity_types
                .iter()
                .map(|entity| self.invalidate_entity(entity)),
        )
        .await;

        results.into_iter().sum()
    }

    // == Invalidate Unit ==
    /// Invalidates an entity type together with its registered companions
    /// (denormalized content spanning several collections is dropped as one
    /// unit).
    pub async fn invalidate_unit(&self, entity_type: &str) -> usize {
        let unit = registry::invalidation_unit(entity_type);
        self.invalidate_multiple(&unit).await
    }

    // == Flush All ==
    /// Clears the entire namespace (`prefix:*`), never anything outside it.
    pub async fn flush_all(&self) -> usize {
        let pattern = format!("{}:*", self.prefix);
        let backend = self.backend().await;

        match backend.flush_pattern(&pattern).await {
            Ok(removed) => {
                self.stats.record_invalidation();
                info!(removed, "cache namespace flushed");
                removed
            }
            Err(err) => {
                warn!(error = %err, "namespace flush failed");
                self.note_backend_failure(backend.kind()).await;
                0
            }
        }
    }

    // == Get Or Set ==
    /// Read-through composition: returns the cached value, or runs the
    /// producer, stores the result, and returns it.
    ///
    /// No single-flight de-duplication is provided: two concurrent misses
    /// on one key both invoke the producer and both write the result. The
    /// producer must not assume exclusivity.
    pub async fn get_or_set<F, Fut>(
        &self,
        key: &str,
        ttl_seconds: Option<u64>,
        producer: F,
    ) -> anyhow::Result<CachedValue>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<Value>>,
    {
        if let Some(data) = self.get(key).await {
            return Ok(CachedValue {
                data,
                from_cache: true,
            });
        }

        let data = producer().await?;
        self.set(key, &data, ttl_seconds).await;

        Ok(CachedValue {
            data,
            from_cache: false,
        })
    }

    // == Health ==
    /// Pings the active backend.
    pub async fn ping(&self) -> bool {
        self.backend().await.ping().await.is_ok()
    }

    // == Stats ==
    /// Current counter snapshot.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// System-wide default TTL in seconds.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }
}
