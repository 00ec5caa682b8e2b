//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Per-operation timeout in milliseconds
    ///
    /// Every cache call is bounded; on timeout the read path falls back
    /// to the durable store instead of blocking the request.
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,

    /// TTL for verification status entries in seconds
    #[serde(default = "default_status_ttl")]
    pub status_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            operation_timeout_ms: default_operation_timeout_ms(),
            status_ttl_seconds: default_status_ttl(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connection_timeout: std::env::var("REDIS_CONNECTION_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.connection_timeout),
            operation_timeout_ms: std::env::var("REDIS_OPERATION_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.operation_timeout_ms),
            status_ttl_seconds: std::env::var("STATUS_CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.status_ttl_seconds),
        }
    }
}

fn default_operation_timeout_ms() -> u64 {
    500
}

fn default_status_ttl() -> u64 {
    // Status entries live for days; much longer than any OTP TTL
    3 * 24 * 3600
}
