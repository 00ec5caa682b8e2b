//! Verification status reads and writes.
//!
//! The durable user record is authoritative; the cache is a read
//! accelerator that may be stale by at most its TTL or lost entirely
//! without affecting correctness.

pub mod memory;
pub mod service;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use memory::InMemoryStatusCache;
pub use service::VerificationStatusService;
pub use traits::StatusCache;
pub use types::{StatusEntry, StatusSource, VerificationStatus};
