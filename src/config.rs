//! Configuration Module
//!
//! Handles loading server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::CacheConfig;

const DEFAULT_TTL_MS: u64 = 5_000;
const DEFAULT_MAX_PAYLOAD_SIZE: usize = 1024 * 1024; // 1 MB
const DEFAULT_SERVER_PORT: u16 = 3000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Age in milliseconds past which an entry is stale
    pub ttl_ms: u64,
    /// Reaper period in milliseconds; half the TTL when unset
    pub sweep_interval_ms: Option<u64>,
    /// Largest accepted payload in bytes
    pub max_payload_size: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 5000)
    /// - `SWEEP_INTERVAL_MS` - Reaper period in milliseconds (default: TTL / 2)
    /// - `MAX_PAYLOAD_SIZE` - Largest payload in bytes (default: 1 MiB)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// Missing, unparseable and zero values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            ttl_ms: positive_var("CACHE_TTL_MS").unwrap_or(DEFAULT_TTL_MS),
            sweep_interval_ms: positive_var("SWEEP_INTERVAL_MS"),
            max_payload_size: positive_var("MAX_PAYLOAD_SIZE").unwrap_or(DEFAULT_MAX_PAYLOAD_SIZE),
            server_port: positive_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Builds the cache timing described by this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        let config = CacheConfig::new(Duration::from_millis(self.ttl_ms));
        match self.sweep_interval_ms {
            Some(ms) => config.with_sweep_interval(Duration::from_millis(ms)),
            None => config,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            sweep_interval_ms: None,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

/// Reads `name` and parses it, discarding zero.
fn positive_var<T>(name: &str) -> Option<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|v: &T| *v != T::default())
}
