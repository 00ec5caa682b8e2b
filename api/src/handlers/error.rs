//! Domain error to HTTP response mapping.
//!
//! One place decides status codes and body shape so every endpoint
//! reports failures identically:
//!
//! ```json
//! { "error": "OTP_MISMATCH", "message": "...", "details": { ... } }
//! ```

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use validator::ValidationErrors;

use vf_core::errors::{DomainError, OtpError};

/// Status code for a domain error
fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation(_) | DomainError::Otp(_) => StatusCode::BAD_REQUEST,
        DomainError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Structured detail payload, where the error carries one
fn details_for(error: &DomainError) -> Option<serde_json::Value> {
    match error {
        DomainError::RateLimited {
            retry_after_seconds,
            limit,
            window_seconds,
        } => Some(json!({
            "retry_after_seconds": retry_after_seconds,
            "limit": limit,
            "window_seconds": window_seconds,
        })),
        DomainError::Otp(OtpError::Mismatch { remaining_attempts }) => Some(json!({
            "remaining_attempts": remaining_attempts,
        })),
        _ => None,
    }
}

/// Render a domain error as its HTTP response
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    let status = status_for(error);
    let mut body = json!({
        "error": error.code(),
        "message": error.to_string(),
    });
    if let Some(details) = details_for(error) {
        body["details"] = details;
    }

    let mut response = HttpResponse::build(status);
    if let DomainError::RateLimited {
        retry_after_seconds,
        ..
    } = error
    {
        response.insert_header(("Retry-After", retry_after_seconds.to_string()));
    }
    response.json(body)
}

/// Render request-body validation failures as a 400 with field detail
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: serde_json::Map<String, serde_json::Value> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), json!(messages))
        })
        .collect();

    HttpResponse::BadRequest().json(json!({
        "error": "VALIDATION_ERROR",
        "message": "invalid request body",
        "details": { "fields": fields },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_core::errors::{TokenError, ValidationError};

    #[test]
    fn otp_outcomes_map_to_bad_request() {
        assert_eq!(
            status_for(&DomainError::Otp(OtpError::NotFound)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::Otp(OtpError::Exhausted)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::Validation(ValidationError::InvalidEmail)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn token_failures_map_to_unauthorized() {
        for err in [
            TokenError::Invalid,
            TokenError::Expired,
            TokenError::Revoked,
            TokenError::Stale,
        ] {
            assert_eq!(status_for(&DomainError::Token(err)), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn rate_limiting_maps_to_429_with_retry_detail() {
        let err = DomainError::RateLimited {
            retry_after_seconds: 120,
            limit: 5,
            window_seconds: 900,
        };
        assert_eq!(status_for(&err), StatusCode::TOO_MANY_REQUESTS);
        let details = details_for(&err).unwrap();
        assert_eq!(details["retry_after_seconds"], 120);
        assert_eq!(details["limit"], 5);
    }

    #[test]
    fn mismatch_carries_remaining_attempts() {
        let err = DomainError::Otp(OtpError::Mismatch {
            remaining_attempts: 2,
        });
        let details = details_for(&err).unwrap();
        assert_eq!(details["remaining_attempts"], 2);
    }

    #[test]
    fn outages_map_to_service_unavailable() {
        let err = DomainError::Unavailable {
            message: "redis down".into(),
        };
        assert_eq!(status_for(&err), StatusCode::SERVICE_UNAVAILABLE);
    }
}
