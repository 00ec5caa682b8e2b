//! OTP endpoints: issue, verify, resend

use actix_web::{web, HttpResponse};
use tracing::{error, info};
use validator::Validate;

use vf_core::repositories::UserRepository;
use vf_core::services::{Notifier, OtpStore, RateLimitStore, RevocationStore, StatusCache};
use vf_shared::types::response::ApiResponse;
use vf_shared::utils::email::mask_email;

use crate::app::AppState;
use crate::dto::auth::{
    IssueOtpRequest, IssueOtpResponse, ResendOtpRequest, VerifyOtpRequest, VerifyOtpResponse,
};
use crate::handlers::error::{domain_error_response, validation_error_response};

/// POST /api/v1/otp/issue
pub async fn issue<O, N, R, U, V, C>(
    state: web::Data<AppState<O, N, R, U, V, C>>,
    request: web::Json<IssueOtpRequest>,
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

    match state.otp.issue(&request.email, request.purpose).await {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::new(IssueOtpResponse {
            expires_at: result.expires_at,
            expires_in_seconds: result.expires_in_seconds,
        })),
        Err(e) => domain_error_response(&e),
    }
}

/// PATCH /api/v1/otp/resend
pub async fn resend<O, N, R, U, V, C>(
    state: web::Data<AppState<O, N, R, U, V, C>>,
    request: web::Json<ResendOtpRequest>,
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

    match state.otp.resend(&request.email, request.purpose).await {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::new(IssueOtpResponse {
            expires_at: result.expires_at,
            expires_in_seconds: result.expires_in_seconds,
        })),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/v1/otp/verify
///
/// On a correct code: marks the account verified and issues a token
/// pair when one exists, or asks the client to collect profile details
/// when it does not. Both outcomes are 200 so account existence is not
/// disclosed.
pub async fn verify<O, N, R, U, V, C>(
    state: web::Data<AppState<O, N, R, U, V, C>>,
    request: web::Json<VerifyOtpRequest>,
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

    if let Err(e) = state
        .otp
        .verify(&request.email, &request.code, request.purpose)
        .await
    {
        return domain_error_response(&e);
    }

    let user = match state.status.mark_verified_by_email(&request.email).await {
        Ok(user) => user,
        Err(e) => {
            error!(
                identifier = %mask_email(&request.email),
                error = %e,
                "Code accepted but status update failed"
            );
            return domain_error_response(&e);
        }
    };

    let response = match user {
        Some(user) => match state.tokens.issue(user.id).await {
            Ok(tokens) => {
                info!(user_id = %user.id, "Verification completed with token issuance");
                VerifyOtpResponse {
                    verified: true,
                    next_step: "authenticated".to_string(),
                    tokens: Some(tokens),
                }
            }
            Err(e) => {
                error!(user_id = %user.id, error = %e, "Token issuance after verification failed");
                return domain_error_response(&e);
            }
        },
        None => VerifyOtpResponse {
            verified: true,
            next_step: "profile-details".to_string(),
            tokens: None,
        },
    };

    HttpResponse::Ok().json(ApiResponse::new(response))
}
