//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds applied to writes without an explicit expiration
    pub default_ttl_secs: u64,
    /// Seconds between periodic reap passes
    pub reap_interval_secs: u64,
    /// Maximum keys the reaper removes per lock acquisition
    pub reap_batch: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_TTL_SECS` - Default TTL in seconds (default: 300)
    /// - `REAP_INTERVAL_SECS` - Reap pass frequency in seconds (default: 30)
    /// - `REAP_BATCH` - Max keys reaped per batch (default: 256)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            default_ttl_secs: env::var("DEFAULT_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            reap_interval_secs: env::var("REAP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            reap_batch: env::var("REAP_BATCH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
        }
    }

    /// Default TTL as a [`Duration`].
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            default_ttl_secs: 300,
            reap_interval_secs: 30,
            reap_batch: 256,
        }
    }
}
