//! OTP issuance, verification and resend flows

use std::sync::Arc;

use tracing::{info, warn};
use vf_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::otp::{code_format_valid, generate_code};
use crate::domain::entities::{OtpPurpose, OtpRecord};
use crate::errors::{DomainError, DomainResult, OtpError, ValidationError};
use crate::services::clock::Clock;
use crate::services::rate_limit::{RateLimitStore, RateLimiter};

use super::config::OtpServiceConfig;
use super::traits::{Notifier, OtpStore};
use super::types::IssueResult;

/// Issues, verifies and resends one-time passcodes.
///
/// All store and delivery dependencies come in through traits so the
/// flows can be tested against in-process fakes with a manual clock.
pub struct OtpService<O, N, R>
where
    O: OtpStore,
    N: Notifier + 'static,
    R: RateLimitStore,
{
    store: Arc<O>,
    notifier: Arc<N>,
    limiter: Arc<RateLimiter<R>>,
    clock: Arc<dyn Clock>,
    config: OtpServiceConfig,
}

impl<O, N, R> OtpService<O, N, R>
where
    O: OtpStore,
    N: Notifier + 'static,
    R: RateLimitStore,
{
    pub fn new(
        store: Arc<O>,
        notifier: Arc<N>,
        limiter: Arc<RateLimiter<R>>,
        clock: Arc<dyn Clock>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            limiter,
            clock,
            config,
        }
    }

    /// Issue a fresh code for `(email, purpose)`.
    ///
    /// Issuing while a code is still active replaces it: the previous
    /// code stops verifying the moment the new record lands. Delivery is
    /// dispatched on a detached task so provider latency never shows up
    /// in the request path.
    pub async fn issue(&self, email: &str, purpose: OtpPurpose) -> DomainResult<IssueResult> {
        let email = self.validate_email(email)?;

        self.limiter
            .require(
                &rate_key("issue", &email),
                self.config.issue_per_window,
                self.config.window_seconds,
            )
            .await?;

        self.issue_inner(email, purpose).await
    }

    /// Verify a candidate code and consume the record on success.
    ///
    /// A correct code verifies exactly once; a replay finds no record
    /// and reports [`OtpError::NotFound`], indistinguishable from a code
    /// that was never issued.
    pub async fn verify(&self, email: &str, code: &str, purpose: OtpPurpose) -> DomainResult<()> {
        let email = self.validate_email(email)?;
        if !code_format_valid(code) {
            return Err(ValidationError::InvalidFormat {
                field: "code".to_string(),
            }
            .into());
        }

        self.limiter
            .require(
                &rate_key("verify", &email),
                self.config.verify_per_window,
                self.config.window_seconds,
            )
            .await?;

        let record = self
            .store
            .get(&email, purpose)
            .await?
            .ok_or(OtpError::NotFound)?;

        let now = self.clock.now();
        if record.is_expired(now) {
            // TTL eviction normally handles this; drop it eagerly when
            // the clock beats the store.
            let _ = self.store.consume(&email, purpose).await;
            return Err(OtpError::Expired.into());
        }

        if record.attempts_remaining == 0 {
            return Err(OtpError::Exhausted.into());
        }

        if !record.matches(code) {
            return self.record_mismatch(record, &email, purpose).await;
        }

        // Atomic consume: under a concurrent duplicate submit, exactly
        // one request deletes the record and succeeds.
        match self.store.consume(&email, purpose).await? {
            Some(_) => {
                info!(
                    identifier = %mask_email(&email),
                    purpose = purpose.as_str(),
                    event = "otp_verified",
                    "Verification code accepted"
                );
                Ok(())
            }
            None => Err(OtpError::NotFound.into()),
        }
    }

    /// Re-deliver for `(email, purpose)`.
    ///
    /// While a previous code is still valid the request is rejected with
    /// a conflict rather than silently minting a replacement; once the
    /// code has expired or been consumed, a fresh one is issued.
    pub async fn resend(&self, email: &str, purpose: OtpPurpose) -> DomainResult<IssueResult> {
        let email = self.validate_email(email)?;

        self.limiter
            .require(
                &rate_key("resend", &email),
                self.config.resend_per_window,
                self.config.window_seconds,
            )
            .await?;

        let now = self.clock.now();
        if let Some(record) = self.store.get(&email, purpose).await? {
            if !record.is_expired(now) {
                return Err(DomainError::Conflict {
                    message: format!(
                        "a verification code is still active for another {} seconds",
                        record.seconds_until_expiry(now)
                    ),
                });
            }
        }

        self.issue_inner(email, purpose).await
    }

    async fn issue_inner(&self, email: String, purpose: OtpPurpose) -> DomainResult<IssueResult> {
        let now = self.clock.now();
        let code = generate_code();
        let record = OtpRecord::new(email.clone(), &code, purpose, now);
        let ttl = record.seconds_until_expiry(now);

        self.store.put(&record, ttl).await?;

        info!(
            identifier = %mask_email(&email),
            purpose = purpose.as_str(),
            expires_in = ttl,
            event = "otp_issued",
            "Verification code issued"
        );

        let notifier = Arc::clone(&self.notifier);
        let masked = mask_email(&email);
        tokio::spawn(async move {
            match notifier.send_code(&email, None, &code, purpose).await {
                Ok(message_id) => {
                    info!(
                        identifier = %masked,
                        message_id = %message_id,
                        event = "otp_delivered",
                        "Verification code dispatched"
                    );
                }
                Err(e) => {
                    warn!(
                        identifier = %masked,
                        error = %e,
                        event = "otp_delivery_failed",
                        "Verification code delivery failed"
                    );
                }
            }
        });

        Ok(IssueResult {
            expires_at: record.expires_at,
            expires_in_seconds: ttl,
        })
    }

    async fn record_mismatch(
        &self,
        mut record: OtpRecord,
        email: &str,
        purpose: OtpPurpose,
    ) -> DomainResult<()> {
        record.attempts_remaining -= 1;
        let remaining = record.attempts_remaining;

        if remaining == 0 {
            // The code is burned; remove it rather than leave a record
            // that can only ever answer Exhausted.
            let _ = self.store.consume(email, purpose).await;
            warn!(
                identifier = %mask_email(email),
                purpose = purpose.as_str(),
                event = "otp_exhausted",
                "Verification attempts exhausted"
            );
            return Err(OtpError::Exhausted.into());
        }

        self.store.update(&record).await?;
        Err(OtpError::Mismatch {
            remaining_attempts: remaining,
        }
        .into())
    }

    fn validate_email(&self, email: &str) -> DomainResult<String> {
        let normalized = normalize_email(email);
        if !is_valid_email(&normalized) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(normalized)
    }
}

fn rate_key(action: &str, email: &str) -> String {
    format!("otp:{action}:{email}")
}
