//! Cache Statistics Module
//!
//! Tracks cache performance counters across all concurrent requests.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Statistics ==
/// Process-lifetime cache counters, shared by every request.
///
/// Counters are monotonic and reset only on process restart. Atomics are
/// used because the service is accessed through `&self` from every handler
/// and middleware concurrently.
#[derive(Debug, Default)]
pub struct CacheStatistics {
    total_requests: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
    invalidations: AtomicU64,
}

/// Point-in-time copy of the counters, suitable for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub total_requests: u64,
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub invalidations: u64,
    /// hits / (hits + misses), 0.0 when no lookups were made
    pub hit_rate: f64,
}

impl CacheStatistics {
    // == Constructor ==
    /// Creates statistics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Recorders ==
    /// Counts one lookup; every `get` records exactly one request and then
    /// exactly one hit or miss, so `hits + misses == total_requests` holds.
    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Returns a serializable copy of the current counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            hits as f64 / lookups as f64
        };

        StatsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            hits,
            misses,
            sets: self.sets.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            hit_rate,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStatistics::new();
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_requests, 0);
        assert_eq!(snapshot.hits, 0);
        assert_eq!(snapshot.misses, 0);
        assert_eq!(snapshot.sets, 0);
        assert_eq!(snapshot.deletes, 0);
        assert_eq!(snapshot.invalidations, 0);
        assert_eq!(snapshot.hit_rate, 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let stats = CacheStatistics::new();
        stats.record_request();
        stats.record_hit();
        stats.record_request();
        stats.record_miss();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.hit_rate, 0.5);
        assert_eq!(snapshot.hits + snapshot.misses, snapshot.total_requests);
    }

    #[test]
    fn test_write_counters() {
        let stats = CacheStatistics::new();
        stats.record_set();
        stats.record_set();
        stats.record_delete();
        stats.record_invalidation();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.sets, 2);
        assert_eq!(snapshot.deletes, 1);
        assert_eq!(snapshot.invalidations, 1);
    }
}
