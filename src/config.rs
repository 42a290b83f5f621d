//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote cache connection URL; None means memory backend only
    pub redis_url: Option<String>,
    /// Namespace prefix shared by every cache key
    pub cache_prefix: String,
    /// Maximum number of entries the memory backend can hold
    pub max_entries: usize,
    /// Default TTL in seconds for entries without an entity-specific TTL
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Expired-entry reaper interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Remote cache connection URL (default: unset, memory only)
    /// - `CACHE_PREFIX` - Key namespace prefix (default: "graba2z")
    /// - `MAX_ENTRIES` - Maximum memory backend entries (default: 10000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Reaper frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            cache_prefix: env::var("CACHE_PREFIX")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "graba2z".to_string()),
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            cache_prefix: "graba2z".to_string(),
            max_entries: 10_000,
            default_ttl: 3600,
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.redis_url.is_none());
        assert_eq!(config.cache_prefix, "graba2z");
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.default_ttl, 3600);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 60);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("REDIS_URL");
        env::remove_var("CACHE_PREFIX");
        env::remove_var("MAX_ENTRIES");
        env::remove_var("DEFAULT_TTL");
        env::remove_var("SERVER_PORT");
        env::remove_var("CLEANUP_INTERVAL");

        let config = Config::from_env();
        assert!(config.redis_url.is_none());
        assert_eq!(config.cache_prefix, "graba2z");
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.default_ttl, 3600);
    }
}
