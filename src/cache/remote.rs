//! Remote Backend Module
//!
//! Thin adapter over an external Redis instance. Values cross the wire as
//! JSON strings; TTL writes use the native expiring-set primitive; pattern
//! operations use incremental SCAN so a shared Redis is never blocked.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde_json::Value;
use tracing::debug;

use crate::cache::backend::{BackendKind, CacheBackend};
use crate::error::Result;

/// SCAN batch size for pattern iteration.
const SCAN_COUNT: usize = 200;

// == Redis Backend ==
/// Redis-backed cache store using a multiplexed managed connection.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    // == Connect ==
    /// Opens a connection to the given Redis URL and verifies it with PING.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;

        let backend = Self { conn };
        backend.ping().await?;
        Ok(backend)
    }

    /// Runs one SCAN step; returns the next cursor and a batch of keys.
    async fn scan_step(&self, cursor: u64, pattern: &str) -> Result<(u64, Vec<String>)> {
        let mut conn = self.conn.clone();
        let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(SCAN_COUNT)
            .query_async(&mut conn)
            .await?;
        Ok((next, batch))
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(key).await?;

        match raw {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &Value, ttl_seconds: Option<u64>) -> Result<()> {
        let mut conn = self.conn.clone();
        let payload = serde_json::to_string(value)?;

        match ttl_seconds {
            // Atomic set+expire
            Some(ttl) => {
                let _: () = conn.set_ex(key, payload, ttl).await?;
            }
            None => {
                let _: () = conn.set(key, payload).await?;
            }
        }

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut cursor = 0u64;
        let mut keys = Vec::new();

        loop {
            let (next, batch) = self.scan_step(cursor, pattern).await?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys)
    }

    async fn flush_pattern(&self, pattern: &str) -> Result<usize> {
        let mut cursor = 0u64;
        let mut removed = 0usize;

        // Delete in batches as the cursor advances rather than collecting
        // every key first
        loop {
            let (next, batch) = self.scan_step(cursor, pattern).await?;

            if !batch.is_empty() {
                let mut conn = self.conn.clone();
                let deleted: i64 = conn.del(&batch).await?;
                removed += deleted as usize;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!(pattern, removed, "redis pattern flush complete");
        Ok(removed)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Redis
    }
}
