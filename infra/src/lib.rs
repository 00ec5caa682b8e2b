//! # Infrastructure Layer
//!
//! Concrete implementations of the core's store and delivery seams:
//! MySQL persistence for users, Redis-backed OTP, revocation, status
//! and rate-limit stores, and an HTTP mail provider for code delivery.

pub mod cache;
pub mod database;
pub mod email;

use thiserror::Error;

/// Infrastructure construction and configuration errors.
///
/// Runtime store failures flow through `vf_core::errors::StoreError`;
/// this type covers setup problems that should stop the process.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
