//! Counter store trait for fixed-window rate limiting

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::StoreError;

/// Result of counting one request against a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCount {
    /// Requests seen in the current window, including this one
    pub count: u32,

    /// When the current window ends and the counter resets
    pub reset_at: DateTime<Utc>,
}

/// Atomic fixed-window counter store.
///
/// Implementations must make `incr` a single atomic step (Redis INCR +
/// first-increment EXPIRE, or a mutex over a process-local map) so that
/// concurrent handlers on the same key never lose counts.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Count one request against `key`'s window of `window_seconds`,
    /// starting a fresh window if none is active.
    async fn incr(&self, key: &str, window_seconds: u64) -> Result<WindowCount, StoreError>;

    /// Drop the counter for `key`, ending its window immediately
    async fn reset(&self, key: &str) -> Result<(), StoreError>;
}
