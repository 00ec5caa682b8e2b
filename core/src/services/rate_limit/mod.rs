//! Fixed-window rate limiting.
//!
//! Counters live behind the [`RateLimitStore`] trait so that a shared
//! external store (Redis in production) makes limits global across
//! service instances. The bundled in-memory store is per-process and
//! therefore per-instance; that scaling limitation is inherent to it,
//! not to the limiter.

pub mod limiter;
pub mod memory;
pub mod store;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use limiter::{RateLimitDecision, RateLimiter};
pub use memory::InMemoryRateLimitStore;
pub use store::{RateLimitStore, WindowCount};
pub use sweep::spawn_counter_sweep;
