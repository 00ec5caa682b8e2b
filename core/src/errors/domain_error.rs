//! Domain-specific error types for verification and token operations
//!
//! The taxonomy maps one-to-one onto HTTP statuses at the API boundary:
//! validation and OTP outcomes are user-correctable (400), rate limiting
//! is 429 with a retry hint, token failures are 401, conflicts 409,
//! downstream outages 502/503, everything unexpected 500.

use thiserror::Error;

use super::store_error::StoreError;

/// One-time passcode errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// No active code for the identifier: never issued, already
    /// consumed, or evicted by TTL. A replayed correct code lands here.
    #[error("verification code has expired or does not exist")]
    NotFound,

    #[error("verification code has expired")]
    Expired,

    #[error("invalid verification code")]
    Mismatch { remaining_attempts: u32 },

    #[error("maximum verification attempts exceeded")]
    Exhausted,
}

/// Signed-token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("token has been revoked")]
    Revoked,

    /// The presented refresh token does not match the reference stored
    /// against the subject (an old, rotated-out token).
    #[error("refresh token does not match the active session")]
    Stale,

    #[error("token generation failed")]
    GenerationFailed,
}

/// Input validation errors, surfaced verbatim with field detail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("field required: {field}")]
    RequiredField { field: String },
}

/// Unified domain error
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("too many requests")]
    RateLimited {
        retry_after_seconds: u64,
        limit: u32,
        window_seconds: u64,
    },

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("downstream dependency unavailable: {message}")]
    Unavailable { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::Unavailable {
            message: err.to_string(),
        }
    }
}

/// Result alias used throughout the core services
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "VALIDATION_ERROR",
            DomainError::RateLimited { .. } => "RATE_LIMITED",
            DomainError::Otp(OtpError::NotFound) => "OTP_NOT_FOUND",
            DomainError::Otp(OtpError::Expired) => "OTP_EXPIRED",
            DomainError::Otp(OtpError::Mismatch { .. }) => "OTP_MISMATCH",
            DomainError::Otp(OtpError::Exhausted) => "OTP_EXHAUSTED",
            DomainError::Token(TokenError::Invalid) => "INVALID_TOKEN",
            DomainError::Token(TokenError::Expired) => "TOKEN_EXPIRED",
            DomainError::Token(TokenError::Revoked) => "TOKEN_REVOKED",
            DomainError::Token(TokenError::Stale) => "TOKEN_STALE",
            DomainError::Token(TokenError::GenerationFailed) => "TOKEN_GENERATION_FAILED",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Conflict { .. } => "CONFLICT",
            DomainError::Unavailable { .. } => "UNAVAILABLE",
            DomainError::Internal { .. } => "INTERNAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_surface_as_unavailable() {
        let err: DomainError = StoreError::Timeout.into();
        assert!(matches!(err, DomainError::Unavailable { .. }));
        assert_eq!(err.code(), "UNAVAILABLE");
    }

    #[test]
    fn otp_errors_carry_stable_codes() {
        let err: DomainError = OtpError::Mismatch {
            remaining_attempts: 2,
        }
        .into();
        assert_eq!(err.code(), "OTP_MISMATCH");
        assert_eq!(DomainError::from(OtpError::NotFound).code(), "OTP_NOT_FOUND");
    }

    #[test]
    fn messages_are_user_presentable() {
        let err = DomainError::from(OtpError::NotFound);
        assert!(err.to_string().contains("expired or does not exist"));
    }
}
