//! Memory Backend Module
//!
//! Bounded, TTL-aware in-process store used when no remote cache is
//! configured or reachable.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::backend::{BackendKind, CacheBackend};
use crate::cache::entry::CacheEntry;
use crate::error::Result;

// == Memory Backend ==
/// Volatile key-value store with lazy expiry and insertion-order eviction.
///
/// Eviction is deliberately first-inserted-first-out, not LRU: when at
/// capacity, `set` evicts exactly one entry (the oldest-inserted key) before
/// inserting, so capacity is a soft ceiling under write pressure.
#[derive(Debug)]
pub struct MemoryBackend {
    inner: RwLock<MemoryInner>,
    max_entries: usize,
}

#[derive(Debug, Default)]
struct MemoryInner {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Keys in insertion order; front = oldest-inserted
    insertion_order: VecDeque<String>,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates a new MemoryBackend with the given capacity.
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: RwLock::new(MemoryInner::default()),
            max_entries,
        }
    }

    // == Purge Expired ==
    /// Removes all entries past expiry. Called by the background reaper;
    /// returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let mut inner = self.inner.write().await;

        let expired_keys: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            inner.entries.remove(key);
            inner.insertion_order.retain(|k| k != key);
        }

        expired_keys.len()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    /// Returns true if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut inner = self.inner.write().await;

        match inner.entries.get(key) {
            None => return Ok(None),
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => {}
        }

        // Lazy expiry: expired entries are deleted on access
        inner.entries.remove(key);
        inner.insertion_order.retain(|k| k != key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &Value, ttl_seconds: Option<u64>) -> Result<()> {
        let mut inner = self.inner.write().await;

        let is_overwrite = inner.entries.contains_key(key);

        // At capacity: evict exactly one entry, the oldest-inserted key
        if !is_overwrite && inner.entries.len() >= self.max_entries {
            if let Some(evicted_key) = inner.insertion_order.pop_front() {
                inner.entries.remove(&evicted_key);
            }
        }

        inner
            .entries
            .insert(key.to_string(), CacheEntry::new(value.clone(), ttl_seconds));

        // Overwrites keep their original insertion position
        if !is_overwrite {
            inner.insertion_order.push_back(key.to_string());
        }

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;

        if inner.entries.remove(key).is_some() {
            inner.insertion_order.retain(|k| k != key);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let inner = self.inner.read().await;

        // Full scan; acceptable here since the remote backend covers the
        // cursor-based alternative
        Ok(inner
            .entries
            .keys()
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect())
    }

    async fn flush_pattern(&self, pattern: &str) -> Result<usize> {
        let mut inner = self.inner.write().await;

        let matched: Vec<String> = inner
            .entries
            .keys()
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect();

        for key in &matched {
            inner.entries.remove(key);
            inner.insertion_order.retain(|k| k != key);
        }

        Ok(matched.len())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }
}

// == Glob Matching ==
/// Matches a glob pattern where `*` matches any run of characters and every
/// other character is literal. Entity-type names containing punctuation can
/// therefore never widen a match.
fn glob_match(pattern: &str, text: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == text;
    }

    let segments: Vec<&str> = pattern.split('*').collect();

    // Anchored prefix
    let first = segments[0];
    if !text.starts_with(first) {
        return false;
    }
    let mut rest = &text[first.len()..];

    // Middle segments must appear in order
    for segment in &segments[1..segments.len() - 1] {
        if segment.is_empty() {
            continue;
        }
        match rest.find(segment) {
            Some(idx) => rest = &rest[idx + segment.len()..],
            None => return false,
        }
    }

    // Anchored suffix
    rest.ends_with(segments[segments.len() - 1])
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_set_and_get() {
        let backend = MemoryBackend::new(100);

        backend
            .set("graba2z:products:abc", &json!({"price": 10}), Some(1800))
            .await
            .unwrap();

        let value = backend.get("graba2z:products:abc").await.unwrap();
        assert_eq!(value, Some(json!({"price": 10})));
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let backend = MemoryBackend::new(100);
        assert_eq!(backend.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_del() {
        let backend = MemoryBackend::new(100);

        backend.set("k", &json!(1), None).await.unwrap();
        assert!(backend.del("k").await.unwrap());
        assert!(!backend.del("k").await.unwrap());
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_overwrite_keeps_single_entry() {
        let backend = MemoryBackend::new(100);

        backend.set("k", &json!("v1"), None).await.unwrap();
        backend.set("k", &json!("v2"), None).await.unwrap();

        assert_eq!(backend.get("k").await.unwrap(), Some(json!("v2")));
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_lazy_expiry_on_get() {
        let backend = MemoryBackend::new(100);

        backend.set("short", &json!(1), Some(1)).await.unwrap();
        assert!(backend.get("short").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(backend.get("short").await.unwrap(), None);
        assert_eq!(backend.len().await, 0);
    }

    #[tokio::test]
    async fn test_insertion_order_eviction() {
        let backend = MemoryBackend::new(3);

        backend.set("k1", &json!(1), None).await.unwrap();
        backend.set("k2", &json!(2), None).await.unwrap();
        backend.set("k3", &json!(3), None).await.unwrap();

        // Reading k1 must NOT protect it: eviction is insertion order, not LRU
        backend.get("k1").await.unwrap();

        backend.set("k4", &json!(4), None).await.unwrap();

        assert_eq!(backend.len().await, 3);
        assert_eq!(backend.get("k1").await.unwrap(), None);
        assert!(backend.get("k2").await.unwrap().is_some());
        assert!(backend.get("k3").await.unwrap().is_some());
        assert!(backend.get("k4").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_capacity_evicts_exactly_one() {
        let max = 5;
        let backend = MemoryBackend::new(max);

        for i in 0..=max {
            backend
                .set(&format!("key{}", i), &json!(i), None)
                .await
                .unwrap();
        }

        assert_eq!(backend.len().await, max);
        assert_eq!(backend.get("key0").await.unwrap(), None);
        assert!(backend.get("key1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_keys_pattern() {
        let backend = MemoryBackend::new(100);

        backend.set("graba2z:products:1", &json!(1), None).await.unwrap();
        backend.set("graba2z:products:2", &json!(2), None).await.unwrap();
        backend.set("graba2z:brands:1", &json!(3), None).await.unwrap();

        let mut keys = backend.keys("graba2z:products:*").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["graba2z:products:1", "graba2z:products:2"]);
    }

    #[tokio::test]
    async fn test_flush_pattern_prefix_isolation() {
        let backend = MemoryBackend::new(100);

        backend.set("graba2z:products:1", &json!(1), None).await.unwrap();
        backend.set("graba2z:brands:1", &json!(2), None).await.unwrap();

        let removed = backend.flush_pattern("graba2z:products:*").await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(backend.get("graba2z:products:1").await.unwrap(), None);
        assert!(backend.get("graba2z:brands:1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let backend = MemoryBackend::new(100);

        backend.set("short", &json!(1), Some(1)).await.unwrap();
        backend.set("long", &json!(2), Some(60)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let removed = backend.purge_expired().await;
        assert_eq!(removed, 1);
        assert_eq!(backend.len().await, 1);
        assert!(backend.get("long").await.unwrap().is_some());
    }

    #[test]
    fn test_glob_match_literal() {
        assert!(glob_match("graba2z:products:abc", "graba2z:products:abc"));
        assert!(!glob_match("graba2z:products:abc", "graba2z:products:abd"));
    }

    #[test]
    fn test_glob_match_trailing_star() {
        assert!(glob_match("graba2z:products:*", "graba2z:products:anything"));
        assert!(glob_match("graba2z:products:*", "graba2z:products:"));
        assert!(!glob_match("graba2z:products:*", "graba2z:brands:anything"));
    }

    #[test]
    fn test_glob_match_metacharacters_are_literal() {
        // Punctuation in entity names must not behave like regex
        assert!(!glob_match("graba2z:a.c:*", "graba2z:abc:key"));
        assert!(glob_match("graba2z:a.c:*", "graba2z:a.c:key"));
    }

    #[test]
    fn test_glob_match_middle_star() {
        assert!(glob_match("graba2z:*:abc", "graba2z:products:abc"));
        assert!(!glob_match("graba2z:*:abc", "graba2z:products:abd"));
    }
}
