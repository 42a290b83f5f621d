//! Storefront Cache - read-through response cache for the storefront API
//!
//! Serves the cache management endpoints and hosts the cache service the
//! storefront routes mount their caching middleware on.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Create the cache service (memory backend active)
//! 4. Start the remote connection supervisor when REDIS_URL is set
//! 5. Start the expired-entry reaper
//! 6. Create the Axum router with the management endpoints
//! 7. Start the HTTP server on the configured port
//! 8. Handle graceful shutdown on SIGINT/SIGTERM

mod api;
mod cache;
mod config;
mod error;
mod middleware;
mod models;
mod tasks;

use std::net::SocketAddr;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use cache::CacheService;
use config::Config;
use tasks::{spawn_reaper_task, spawn_remote_supervisor};

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Storefront Cache Service");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: prefix={}, max_entries={}, default_ttl={}s, port={}, cleanup_interval={}s, redis={}",
        config.cache_prefix,
        config.max_entries,
        config.default_ttl,
        config.server_port,
        config.cleanup_interval,
        if config.redis_url.is_some() { "configured" } else { "disabled" },
    );

    // Create the cache service; the memory backend is active until the
    // supervisor installs the remote one
    let service = CacheService::new(&config);

    if let Some(url) = config.redis_url.clone() {
        spawn_remote_supervisor(service.clone(), url);
        info!("Remote cache supervisor started");
    }

    // Start the expired-entry reaper
    let reaper_handle = spawn_reaper_task(service.memory_backend(), config.cleanup_interval);
    info!("Expired-entry reaper started");

    // Create router with the management endpoints
    let state = AppState::new(service);
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(reaper_handle))
        .await
        .unwrap();

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the reaper task and allows graceful shutdown.
async fn shutdown_signal(reaper_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the reaper task
    reaper_handle.abort();
    warn!("Reaper task aborted");
}
