//! Fixed-window rate limiter

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::errors::{DomainError, DomainResult};
use crate::services::clock::Clock;

use super::store::RateLimitStore;

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,

    /// Requests left in the current window
    pub remaining: u32,

    /// When the current window resets
    pub reset_at: DateTime<Utc>,

    /// Seconds until the caller may retry; set only when denied
    pub retry_after_seconds: Option<u64>,
}

/// Fixed-window request limiter over an injected counter store.
///
/// Bursts at window boundaries are an accepted trade-off of fixed
/// windows for O(1) memory and no ordering requirements between
/// counters.
pub struct RateLimiter<S: RateLimitStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    enabled: bool,
}

impl<S: RateLimitStore> RateLimiter<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, enabled: bool) -> Self {
        Self {
            store,
            clock,
            enabled,
        }
    }

    /// Count this request against `key` and decide whether it may
    /// proceed.
    ///
    /// Store unavailability fails OPEN: the request is allowed and the
    /// outage is logged. Failing closed would turn a cache outage into
    /// a full denial of service for every caller.
    pub async fn check(
        &self,
        key: &str,
        max_requests: u32,
        window_seconds: u64,
    ) -> RateLimitDecision {
        let now = self.clock.now();

        if !self.enabled {
            return RateLimitDecision {
                allowed: true,
                remaining: max_requests,
                reset_at: now,
                retry_after_seconds: None,
            };
        }

        match self.store.incr(key, window_seconds).await {
            Ok(window) => {
                let allowed = window.count <= max_requests;
                let remaining = max_requests.saturating_sub(window.count);
                let retry_after_seconds = if allowed {
                    None
                } else {
                    Some((window.reset_at - now).num_seconds().max(1) as u64)
                };
                RateLimitDecision {
                    allowed,
                    remaining,
                    reset_at: window.reset_at,
                    retry_after_seconds,
                }
            }
            Err(e) => {
                warn!(
                    key = key,
                    error = %e,
                    event = "rate_limit_store_unavailable",
                    "Rate-limit store unavailable; failing open"
                );
                RateLimitDecision {
                    allowed: true,
                    remaining: max_requests.saturating_sub(1),
                    reset_at: now,
                    retry_after_seconds: None,
                }
            }
        }
    }

    /// Like [`check`](Self::check) but converts a denial into
    /// `DomainError::RateLimited` carrying the retry hint.
    pub async fn require(
        &self,
        key: &str,
        max_requests: u32,
        window_seconds: u64,
    ) -> DomainResult<RateLimitDecision> {
        let decision = self.check(key, max_requests, window_seconds).await;
        if decision.allowed {
            return Ok(decision);
        }
        Err(DomainError::RateLimited {
            retry_after_seconds: decision.retry_after_seconds.unwrap_or(window_seconds),
            limit: max_requests,
            window_seconds,
        })
    }
}
