//! Limiter behavior against a manually advanced clock and a failing store

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::errors::{DomainError, StoreError};
use crate::services::clock::test_support::ManualClock;
use crate::services::clock::Clock;
use crate::services::rate_limit::memory::InMemoryRateLimitStore;
use crate::services::rate_limit::store::{RateLimitStore, WindowCount};
use crate::services::rate_limit::RateLimiter;

const WINDOW: u64 = 15 * 60;

struct BrokenStore;

#[async_trait]
impl RateLimitStore for BrokenStore {
    async fn incr(&self, _key: &str, _window_seconds: u64) -> Result<WindowCount, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn reset(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

fn limiter() -> (Arc<ManualClock>, RateLimiter<InMemoryRateLimitStore>) {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let store = Arc::new(InMemoryRateLimitStore::new(clock.clone()));
    (clock.clone(), RateLimiter::new(store, clock, true))
}

#[tokio::test]
async fn sixth_request_in_window_is_denied_with_retry_hint() {
    let (_clock, limiter) = limiter();

    for i in 0..5 {
        let decision = limiter.check("otp:issue:user@example.com", 5, WINDOW).await;
        assert!(decision.allowed, "request {} should be allowed", i + 1);
        assert_eq!(decision.remaining, 4 - i);
    }

    let denied = limiter.check("otp:issue:user@example.com", 5, WINDOW).await;
    assert!(!denied.allowed);
    assert_eq!(denied.remaining, 0);
    let retry = denied.retry_after_seconds.unwrap();
    assert!(retry > 0 && retry <= WINDOW);
}

#[tokio::test]
async fn counter_resets_after_the_window_elapses() {
    let (clock, limiter) = limiter();

    for _ in 0..6 {
        limiter.check("k", 5, WINDOW).await;
    }
    assert!(!limiter.check("k", 5, WINDOW).await.allowed);

    clock.advance(Duration::seconds(WINDOW as i64 + 1));
    let fresh = limiter.check("k", 5, WINDOW).await;
    assert!(fresh.allowed);
    assert_eq!(fresh.remaining, 4);
}

#[tokio::test]
async fn retry_after_matches_reset_time() {
    let (clock, limiter) = limiter();
    let first = limiter.check("k", 1, WINDOW).await;

    clock.advance(Duration::seconds(100));
    let denied = limiter.check("k", 1, WINDOW).await;
    assert!(!denied.allowed);
    assert_eq!(
        denied.retry_after_seconds.unwrap(),
        (first.reset_at - clock.now()).num_seconds() as u64
    );
}

#[tokio::test]
async fn store_outage_fails_open() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let limiter = RateLimiter::new(Arc::new(BrokenStore), clock, true);

    for _ in 0..20 {
        let decision = limiter.check("k", 5, WINDOW).await;
        assert!(decision.allowed);
    }
}

#[tokio::test]
async fn disabled_limiter_always_allows() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let store = Arc::new(InMemoryRateLimitStore::new(clock.clone()));
    let limiter = RateLimiter::new(store, clock, false);

    for _ in 0..100 {
        assert!(limiter.check("k", 1, WINDOW).await.allowed);
    }
}

#[tokio::test]
async fn require_converts_denial_into_rate_limited_error() {
    let (_clock, limiter) = limiter();
    limiter.require("k", 1, WINDOW).await.unwrap();

    let err = limiter.require("k", 1, WINDOW).await.unwrap_err();
    match err {
        DomainError::RateLimited {
            retry_after_seconds,
            limit,
            window_seconds,
        } => {
            assert!(retry_after_seconds > 0);
            assert_eq!(limit, 1);
            assert_eq!(window_seconds, WINDOW);
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}
