//! User entity, the single durable record the core consults.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Durable user record. The core only reads the fields it needs and
/// writes status fields; everything else about the user lives outside
/// this subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Normalized email address
    pub email: String,

    /// Display name used when addressing outbound mail
    pub display_name: Option<String>,

    /// Whether the email has been verified. Authoritative; the status
    /// cache is only an accelerator over this flag.
    pub verified: bool,

    /// When the email was verified
    pub verified_at: Option<DateTime<Utc>>,

    /// Birth date, used to derive age for age-verification status
    pub birth_date: Option<NaiveDate>,

    /// SHA-256 hex digest of the currently active refresh token.
    /// At most one active reference per subject; a presented refresh
    /// token that does not hash to this value is stale.
    pub refresh_token_hash: Option<String>,

    /// Last successful token issuance
    pub last_login_at: Option<DateTime<Utc>>,

    /// Last explicit revocation of a refresh token
    pub last_logout_at: Option<DateTime<Utc>>,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,

    /// Record update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user for a normalized email
    pub fn new(email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name: None,
            verified: false,
            verified_at: None,
            birth_date: None,
            refresh_token_hash: None,
            last_login_at: None,
            last_logout_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the user as verified at `now`. Idempotent.
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        if !self.verified {
            self.verified = true;
            self.verified_at = Some(now);
        }
        self.updated_at = now;
    }

    /// Records the active refresh-token reference after issuance
    pub fn set_refresh_reference(&mut self, token_hash: String, now: DateTime<Utc>) {
        self.refresh_token_hash = Some(token_hash);
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Clears the refresh-token reference and records the logout
    pub fn record_logout(&mut self, now: DateTime<Utc>) {
        self.refresh_token_hash = None;
        self.last_logout_at = Some(now);
        self.updated_at = now;
    }

    /// Whole years between the stored birth date and `on`, if known.
    /// A birth date in the future yields `None`.
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        on.years_since(self.birth_date?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_is_unverified() {
        let user = User::new("user@example.com".into());
        assert!(!user.verified);
        assert!(user.verified_at.is_none());
        assert!(user.refresh_token_hash.is_none());
    }

    #[test]
    fn mark_verified_is_idempotent() {
        let mut user = User::new("user@example.com".into());
        let first = Utc::now();
        user.mark_verified(first);
        let verified_at = user.verified_at;
        user.mark_verified(first + chrono::Duration::hours(1));
        assert!(user.verified);
        assert_eq!(user.verified_at, verified_at);
    }

    #[test]
    fn logout_clears_refresh_reference() {
        let mut user = User::new("user@example.com".into());
        let now = Utc::now();
        user.set_refresh_reference("digest".into(), now);
        assert!(user.refresh_token_hash.is_some());
        assert_eq!(user.last_login_at, Some(now));

        user.record_logout(now);
        assert!(user.refresh_token_hash.is_none());
        assert_eq!(user.last_logout_at, Some(now));
    }

    #[test]
    fn age_derives_from_birth_date() {
        let mut user = User::new("user@example.com".into());
        assert_eq!(user.age_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()), None);

        user.birth_date = NaiveDate::from_ymd_opt(2000, 6, 2);
        assert_eq!(
            user.age_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
            Some(23)
        );
        assert_eq!(
            user.age_on(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
            Some(24)
        );
    }
}
