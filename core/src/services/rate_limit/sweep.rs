//! Background sweep for the in-memory counter store.
//!
//! Redis counters expire on their own; the process-local store needs a
//! periodic purge to bound memory. The sweep never affects correctness.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::memory::InMemoryRateLimitStore;

/// Spawn a task that purges expired counters every `interval`
pub fn spawn_counter_sweep(
    store: Arc<InMemoryRateLimitStore>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately; skip it
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = store.purge_expired();
            if purged > 0 {
                debug!(
                    purged = purged,
                    live = store.len(),
                    event = "rate_limit_sweep",
                    "Purged expired rate-limit counters"
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::services::clock::test_support::ManualClock;
    use crate::services::rate_limit::store::RateLimitStore;

    #[tokio::test(start_paused = true)]
    async fn sweep_drops_expired_counters_over_time() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = Arc::new(InMemoryRateLimitStore::new(clock.clone()));

        store.incr("k", 60).await.unwrap();
        assert_eq!(store.len(), 1);

        let handle = spawn_counter_sweep(store.clone(), Duration::from_secs(30));

        // Window still open after the first sweep
        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(store.len(), 1);

        clock.advance(chrono::Duration::seconds(61));
        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(store.len(), 0);

        handle.abort();
    }
}
