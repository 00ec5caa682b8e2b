//! Veriflow API server entry point.
//!
//! Wires the Redis-backed stores, the MySQL user repository and the
//! mail provider into the core services and serves the HTTP API.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use vf_core::services::rate_limit::RateLimiter;
use vf_core::services::otp::OtpServiceConfig;
use vf_core::services::token::TokenServiceConfig;
use vf_core::services::{OtpService, SystemClock, TokenService, VerificationStatusService};
use vf_infra::cache::{
    RedisClient, RedisOtpStore, RedisRateLimitStore, RedisRevocationStore, RedisStatusCache,
};
use vf_infra::database::{create_pool, MySqlUserRepository};
use vf_shared::config::AppConfig;

use vf_api::app::{self, AppState, HealthState, ProductionState};
use vf_api::notifier::Mailer;
use vf_api::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Starting Veriflow API server");

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let redis = RedisClient::new(&config.cache)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let mailer = Arc::new(
        Mailer::from_env()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?,
    );

    let clock = Arc::new(SystemClock);
    let users = Arc::new(MySqlUserRepository::new(pool.clone()));

    let limiter = Arc::new(RateLimiter::new(
        Arc::new(RedisRateLimitStore::new(redis.clone(), clock.clone())),
        clock.clone(),
        config.rate_limit.enabled,
    ));

    let otp = Arc::new(OtpService::new(
        Arc::new(RedisOtpStore::new(redis.clone())),
        mailer,
        limiter,
        clock.clone(),
        OtpServiceConfig::from(&config.rate_limit.otp),
    ));

    let tokens = Arc::new(TokenService::new(
        users.clone(),
        Arc::new(RedisRevocationStore::new(redis.clone())),
        clock.clone(),
        TokenServiceConfig::from(&config.auth),
    ));

    let status = Arc::new(VerificationStatusService::new(
        users,
        Arc::new(RedisStatusCache::new(redis.clone())),
        clock,
        config.cache.status_ttl_seconds,
    ));

    let state: web::Data<ProductionState> = web::Data::new(AppState {
        otp,
        tokens,
        status,
    });
    let health = web::Data::new(HealthState { redis, pool });

    let workers = config.server.workers;
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(app::cors())
            .app_data(state.clone())
            .app_data(health.clone())
            .configure(
                routes::configure::<
                    RedisOtpStore,
                    Mailer,
                    RedisRateLimitStore,
                    MySqlUserRepository,
                    RedisRevocationStore,
                    RedisStatusCache,
                >,
            )
    });
    if workers > 0 {
        server = server.workers(workers);
    }
    server.bind(&bind_address)?.run().await
}
