//! Token endpoints: refresh and revoke

use actix_web::{web, HttpResponse};
use validator::Validate;

use vf_core::errors::{DomainError, ValidationError};
use vf_core::repositories::UserRepository;
use vf_core::services::{Notifier, OtpStore, RateLimitStore, RevocationStore, StatusCache};
use vf_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{RefreshRequest, RevokeRequest};
use crate::handlers::error::{domain_error_response, validation_error_response};

/// POST /api/v1/token/refresh
pub async fn refresh<O, N, R, U, V, C>(
    state: web::Data<AppState<O, N, R, U, V, C>>,
    request: web::Json<RefreshRequest>,
) -> HttpResponse
where
    O: OtpStore + 'static,
    N: Notifier + 'static,
    R: RateLimitStore + 'static,
    U: UserRepository + 'static,
    V: RevocationStore + 'static,
    C: StatusCache + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.tokens.refresh(&request.refresh_token).await {
        Ok(minted) => HttpResponse::Ok().json(ApiResponse::new(minted)),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/v1/token
///
/// Ends a session in one call: both tokens of a pair can ride in the
/// same body, and every one present is revoked. Always 204 on
/// completion: revoking an unknown or already-dead token is
/// indistinguishable from revoking a live one.
pub async fn revoke<O, N, R, U, V, C>(
    state: web::Data<AppState<O, N, R, U, V, C>>,
    request: web::Json<RevokeRequest>,
) -> HttpResponse
where
    O: OtpStore + 'static,
    N: Notifier + 'static,
    R: RateLimitStore + 'static,
    U: UserRepository + 'static,
    V: RevocationStore + 'static,
    C: StatusCache + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let request = request.into_inner();
    let tokens = [request.access_token, request.refresh_token];
    if tokens.iter().all(Option::is_none) {
        return domain_error_response(&DomainError::Validation(
            ValidationError::RequiredField {
                field: "access_token or refresh_token".into(),
            },
        ));
    }

    for token in tokens.into_iter().flatten() {
        if let Err(e) = state.tokens.revoke(&token).await {
            return domain_error_response(&e);
        }
    }

    HttpResponse::NoContent().finish()
}
