//! Process-local counter store.
//!
//! Used as the development default and as the fallback when no shared
//! store is configured. Limits enforced through this store are
//! per-instance, not global; multi-instance deployments should back the
//! limiter with the Redis store instead.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;

use crate::errors::StoreError;
use crate::services::clock::Clock;

use super::store::{RateLimitStore, WindowCount};

#[derive(Debug, Clone, Copy)]
struct CounterEntry {
    count: u32,
    reset_at: chrono::DateTime<chrono::Utc>,
}

/// Mutex-guarded HashMap of fixed-window counters
pub struct InMemoryRateLimitStore {
    entries: Mutex<HashMap<String, CounterEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRateLimitStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Drop counters whose window has passed. Correctness never depends
    /// on this; `incr` restarts stale windows on its own. Only the
    /// memory footprint does.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| entry.reset_at > now);
        before - entries.len()
    }

    /// Number of live counters, for sweep logging
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn incr(&self, key: &str, window_seconds: u64) -> Result<WindowCount, StoreError> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();

        let entry = entries
            .entry(key.to_string())
            .and_modify(|entry| {
                if now >= entry.reset_at {
                    entry.count = 1;
                    entry.reset_at = now + Duration::seconds(window_seconds as i64);
                } else {
                    entry.count += 1;
                }
            })
            .or_insert_with(|| CounterEntry {
                count: 1,
                reset_at: now + Duration::seconds(window_seconds as i64),
            });

        Ok(WindowCount {
            count: entry.count,
            reset_at: entry.reset_at,
        })
    }

    async fn reset(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::services::clock::test_support::ManualClock;

    fn store() -> (Arc<ManualClock>, InMemoryRateLimitStore) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = InMemoryRateLimitStore::new(clock.clone());
        (clock, store)
    }

    #[tokio::test]
    async fn counts_within_a_window() {
        let (_clock, store) = store();
        let first = store.incr("k", 900).await.unwrap();
        let second = store.incr("k", 900).await.unwrap();
        assert_eq!(first.count, 1);
        assert_eq!(second.count, 2);
        assert_eq!(first.reset_at, second.reset_at);
    }

    #[tokio::test]
    async fn window_restarts_after_reset_time() {
        let (clock, store) = store();
        store.incr("k", 900).await.unwrap();
        store.incr("k", 900).await.unwrap();

        clock.advance(Duration::seconds(901));
        let after = store.incr("k", 900).await.unwrap();
        assert_eq!(after.count, 1);
    }

    #[tokio::test]
    async fn purge_drops_only_expired_counters() {
        let (clock, store) = store();
        store.incr("old", 60).await.unwrap();
        clock.advance(Duration::seconds(120));
        store.incr("fresh", 60).await.unwrap();

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let (_clock, store) = store();
        store.incr("a", 900).await.unwrap();
        let b = store.incr("b", 900).await.unwrap();
        assert_eq!(b.count, 1);
    }
}
