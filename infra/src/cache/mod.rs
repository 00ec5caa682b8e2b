//! Redis caching layer: shared client plus the store implementations
//! the core services depend on.

pub mod otp_store;
pub mod rate_limit_store;
pub mod redis_client;
pub mod revocation_store;
pub mod status_cache;

pub use otp_store::RedisOtpStore;
pub use rate_limit_store::RedisRateLimitStore;
pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;
pub use status_cache::RedisStatusCache;
