//! Expired-Entry Reaper Task
//!
//! Background task that periodically removes expired memory-backend entries,
//! bounding memory growth from entries that are never re-read after expiry.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryBackend;

/// Spawns a background task that sweeps the memory backend for expired
/// entries on a fixed interval.
///
/// # Arguments
/// * `backend` - shared reference to the memory backend
/// * `interval_secs` - seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_reaper_task(backend: Arc<MemoryBackend>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expired-entry reaper with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = backend.purge_expired().await;

            if removed > 0 {
                info!("Reaper removed {} expired entries", removed);
            } else {
                debug!("Reaper found no expired entries");
            }
        }
    })
}
