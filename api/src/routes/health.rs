//! Health endpoint reporting dependency reachability

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::app::HealthState;

/// GET /health
///
/// 200 when both dependencies answer, 503 otherwise. The body always
/// carries per-dependency detail for operators.
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    let cache_ok = matches!(state.redis.health_check().await, Ok(true));
    let database_ok = sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .is_ok();

    let body = json!({
        "status": if cache_ok && database_ok { "healthy" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "cache": if cache_ok { "up" } else { "down" },
            "database": if database_ok { "up" } else { "down" },
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if cache_ok && database_ok {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
