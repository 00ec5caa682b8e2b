//! One-time passcode entities for email verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of a verification code
pub const CODE_LENGTH: usize = 6;

/// Maximum verification attempts per code before it is exhausted
pub const MAX_ATTEMPTS: u32 = 5;

/// What an OTP proves; each purpose carries its own code lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OtpPurpose {
    Signup,
    Login,
    EmailChange,
}

impl OtpPurpose {
    /// Code lifetime for this purpose
    pub fn ttl(&self) -> Duration {
        match self {
            OtpPurpose::Signup => Duration::minutes(15),
            OtpPurpose::Login | OtpPurpose::EmailChange => Duration::minutes(10),
        }
    }

    /// Stable string form used in store keys and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Signup => "signup",
            OtpPurpose::Login => "login",
            OtpPurpose::EmailChange => "email-change",
        }
    }
}

/// One-time passcode record, owned exclusively by the cache for its
/// lifetime and never persisted durably. The code itself is stored only
/// as a SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Normalized email the code was issued for
    pub identifier: String,

    /// SHA-256 hex digest of the 6-digit code
    pub code_hash: String,

    /// What the code proves
    pub purpose: OtpPurpose,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Verification attempts left before the code is exhausted
    pub attempts_remaining: u32,
}

impl OtpRecord {
    /// Create a record for a freshly generated code
    pub fn new(identifier: String, code: &str, purpose: OtpPurpose, now: DateTime<Utc>) -> Self {
        Self {
            identifier,
            code_hash: hash_code(code),
            purpose,
            issued_at: now,
            expires_at: now + purpose.ttl(),
            attempts_remaining: MAX_ATTEMPTS,
        }
    }

    /// A record exactly at its expiry instant is already expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Compare a candidate code against the stored digest in constant time
    pub fn matches(&self, code: &str) -> bool {
        let candidate = hash_code(code);
        constant_time_eq(candidate.as_bytes(), self.code_hash.as_bytes())
    }

    /// Seconds until the record expires, saturating at zero
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(0) as u64
    }
}

/// Generate a uniformly distributed 6-digit code in `[100000, 999999]`
/// using the OS CSPRNG. `gen_range` rejection-samples internally, so no
/// digit position is biased.
pub fn generate_code() -> String {
    let mut rng = OsRng;
    let code: u32 = rng.gen_range(100_000..=999_999);
    code.to_string()
}

/// Exactly six ASCII digits; anything else is a format error, not a mismatch
pub fn code_format_valid(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// SHA-256 hex digest of a code
pub fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}
