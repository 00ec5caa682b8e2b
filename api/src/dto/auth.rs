//! Verification and token endpoint payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use vf_core::domain::entities::{OtpPurpose, TokenPair};

/// POST /api/v1/otp/issue
#[derive(Debug, Deserialize, Validate)]
pub struct IssueOtpRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    pub purpose: OtpPurpose,
}

/// PATCH /api/v1/otp/resend
#[derive(Debug, Deserialize, Validate)]
pub struct ResendOtpRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    pub purpose: OtpPurpose,
}

/// POST /api/v1/otp/verify
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(equal = 6, message = "must be exactly 6 digits"))]
    pub code: String,

    pub purpose: OtpPurpose,
}

/// POST /api/v1/token/refresh
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub refresh_token: String,
}

/// DELETE /api/v1/token
///
/// Clients logging out send both halves of the pair at once; either
/// field alone is also accepted. At least one must be present.
#[derive(Debug, Deserialize, Validate)]
pub struct RevokeRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub access_token: Option<String>,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub refresh_token: Option<String>,
}

/// Body returned by issue and resend
#[derive(Debug, Serialize)]
pub struct IssueOtpResponse {
    pub expires_at: DateTime<Utc>,
    pub expires_in_seconds: u64,
}

/// Body returned by verify.
///
/// `next_step` is `authenticated` when an account exists and tokens
/// were issued, `profile-details` otherwise; both answers are 200 so
/// the endpoint does not disclose account existence through status
/// codes.
#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub verified: bool,
    pub next_step: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenPair>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_request_rejects_short_codes() {
        let req = VerifyOtpRequest {
            email: "user@example.com".into(),
            code: "12345".into(),
            purpose: OtpPurpose::Signup,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn verify_request_accepts_a_six_digit_code() {
        let req = VerifyOtpRequest {
            email: "user@example.com".into(),
            code: "123456".into(),
            purpose: OtpPurpose::Login,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn issue_request_rejects_invalid_email() {
        let req = IssueOtpRequest {
            email: "nope".into(),
            purpose: OtpPurpose::Signup,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn purpose_deserializes_from_kebab_case() {
        let req: IssueOtpRequest = serde_json::from_str(
            r#"{"email":"user@example.com","purpose":"email-change"}"#,
        )
        .unwrap();
        assert_eq!(req.purpose, OtpPurpose::EmailChange);
    }

    #[test]
    fn revoke_request_accepts_either_or_both_tokens() {
        let both: RevokeRequest = serde_json::from_str(
            r#"{"access_token":"aaa","refresh_token":"rrr"}"#,
        )
        .unwrap();
        assert!(both.validate().is_ok());
        assert_eq!(both.access_token.as_deref(), Some("aaa"));
        assert_eq!(both.refresh_token.as_deref(), Some("rrr"));

        let one: RevokeRequest = serde_json::from_str(r#"{"refresh_token":"rrr"}"#).unwrap();
        assert!(one.validate().is_ok());
        assert!(one.access_token.is_none());
    }

    #[test]
    fn revoke_request_rejects_empty_strings() {
        let req: RevokeRequest = serde_json::from_str(r#"{"access_token":""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn verify_response_omits_absent_tokens() {
        let body = serde_json::to_string(&VerifyOtpResponse {
            verified: true,
            next_step: "profile-details".into(),
            tokens: None,
        })
        .unwrap();
        assert!(!body.contains("tokens"));
    }
}
