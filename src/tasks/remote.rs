//! Remote Connection Supervisor
//!
//! Dials the remote cache at startup with capped exponential backoff and
//! installs it on success. Once the retry attempts are exhausted the process
//! stays on the memory backend for its remaining lifetime; requests are
//! never failed because the remote cache is down.

use std::cmp::min;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::{CacheService, RedisBackend};

/// Maximum connection attempts before permanently giving up.
const MAX_CONNECT_ATTEMPTS: u32 = 10;
/// Backoff cap in milliseconds.
const MAX_BACKOFF_MS: u64 = 3000;

/// Spawns the supervisor that connects the service to the remote backend.
///
/// Backoff grows as `min(attempt * 100ms, 3000ms)`; after
/// `MAX_CONNECT_ATTEMPTS` failures the supervisor exits and the memory
/// backend keeps serving.
pub fn spawn_remote_supervisor(service: Arc<CacheService>, url: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        for attempt in 1..=MAX_CONNECT_ATTEMPTS {
            match RedisBackend::connect(&url).await {
                Ok(backend) => {
                    service.install_backend(Arc::new(backend)).await;
                    info!(attempt, "connected to remote cache backend");
                    return;
                }
                Err(err) => {
                    let backoff = min(u64::from(attempt) * 100, MAX_BACKOFF_MS);
                    warn!(
                        attempt,
                        error = %err,
                        backoff_ms = backoff,
                        "remote cache connection failed"
                    );
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
            }
        }

        warn!(
            attempts = MAX_CONNECT_ATTEMPTS,
            "giving up on remote cache; memory backend serves for the rest of the process lifetime"
        );
    })
}
