//! Shared application state and middleware construction

use std::sync::Arc;

use actix_cors::Cors;
use sqlx::MySqlPool;

use vf_core::repositories::UserRepository;
use vf_core::services::{
    Notifier, OtpService, OtpStore, RateLimitStore, RevocationStore, StatusCache, TokenService,
    VerificationStatusService,
};
use vf_infra::cache::{
    RedisClient, RedisOtpStore, RedisRateLimitStore, RedisRevocationStore, RedisStatusCache,
};
use vf_infra::database::MySqlUserRepository;

use crate::notifier::Mailer;

/// Shared service handles injected into every handler.
///
/// Generic over the store and delivery seams so the same handlers run
/// against the production wiring and against in-process fakes in the
/// route tests.
pub struct AppState<O, N, R, U, V, C>
where
    O: OtpStore,
    N: Notifier + 'static,
    R: RateLimitStore,
    U: UserRepository,
    V: RevocationStore,
    C: StatusCache,
{
    pub otp: Arc<OtpService<O, N, R>>,
    pub tokens: Arc<TokenService<U, V>>,
    pub status: Arc<VerificationStatusService<U, C>>,
}

/// Production wiring: Redis-backed stores, MySQL users, HTTP mailer
pub type ProductionState = AppState<
    RedisOtpStore,
    Mailer,
    RedisRateLimitStore,
    MySqlUserRepository,
    RedisRevocationStore,
    RedisStatusCache,
>;

/// Raw dependency handles for the health endpoint
pub struct HealthState {
    pub redis: RedisClient,
    pub pool: MySqlPool,
}

/// CORS policy: origins come from `CORS_ALLOWED_ORIGINS` (comma
/// separated); unset means same-origin deployments only.
pub fn cors() -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
        .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
        .max_age(3600);

    if let Ok(origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
        for origin in origins.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
