//! Redis-backed fixed-window counters.
//!
//! Unlike the process-local store, counters here are shared across all
//! instances, so the budgets hold globally.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use vf_core::errors::StoreError;
use vf_core::services::clock::Clock;
use vf_core::services::rate_limit::store::{RateLimitStore, WindowCount};

use super::redis_client::RedisClient;

pub struct RedisRateLimitStore {
    client: RedisClient,
    clock: Arc<dyn Clock>,
}

impl RedisRateLimitStore {
    pub fn new(client: RedisClient, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }

    fn key(key: &str) -> String {
        format!("rate:{key}")
    }
}

/// Turn the raw INCR result into a window count.
///
/// TTL can read -1 if the EXPIRE raced a concurrent window reset; fall
/// back to a full window rather than a counter that never resets.
fn window_count(count: i64, ttl: i64, window_seconds: u64, now: DateTime<Utc>) -> WindowCount {
    let remaining = if ttl > 0 { ttl } else { window_seconds as i64 };
    WindowCount {
        count: count.max(1) as u32,
        reset_at: now + Duration::seconds(remaining),
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn incr(&self, key: &str, window_seconds: u64) -> Result<WindowCount, StoreError> {
        let (count, ttl) = self
            .client
            .increment_with_window(&Self::key(key), window_seconds)
            .await?;

        Ok(window_count(count, ttl, window_seconds, self.clock.now()))
    }

    async fn reset(&self, key: &str) -> Result<(), StoreError> {
        self.client.delete(&Self::key(key)).await?;
        Ok(())
    }
}
