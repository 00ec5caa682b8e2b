//! Error type shared by the store trait boundary (cache-backed stores)

use thiserror::Error;

/// Failure of a cache-backed store operation. Callers decide whether a
/// failure is fatal (authoritative writes) or survivable (best-effort
/// cache writes, reads with a durable fallback).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store operation timed out")]
    Timeout,

    #[error("corrupt store entry: {0}")]
    Corrupt(String),
}
