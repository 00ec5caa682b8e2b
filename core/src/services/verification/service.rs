//! Cache-aside verification status service

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;
use vf_shared::utils::email::{mask_email, normalize_email};

use crate::domain::entities::User;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::clock::Clock;

use super::traits::StatusCache;
use super::types::{StatusEntry, StatusSource, VerificationStatus};

/// Answers status reads cache-first with a durable fallback, and keeps
/// the cache coherent when status changes.
///
/// Every cache interaction is best-effort: a failed read is a miss, a
/// failed write is logged and dropped. Only the durable store can fail
/// an operation.
pub struct VerificationStatusService<U, S>
where
    U: UserRepository,
    S: StatusCache,
{
    users: Arc<U>,
    cache: Arc<S>,
    clock: Arc<dyn Clock>,
    status_ttl_seconds: u64,
}

impl<U, S> VerificationStatusService<U, S>
where
    U: UserRepository,
    S: StatusCache,
{
    pub fn new(
        users: Arc<U>,
        cache: Arc<S>,
        clock: Arc<dyn Clock>,
        status_ttl_seconds: u64,
    ) -> Self {
        Self {
            users,
            cache,
            clock,
            status_ttl_seconds,
        }
    }

    fn entry_for(&self, user: &User) -> StatusEntry {
        StatusEntry {
            verified: user.verified,
            verified_at: user.verified_at,
            age: user.age_on(self.clock.now().date_naive()),
        }
    }

    async fn cache_put(&self, subject_id: Uuid, entry: &StatusEntry) {
        if let Err(e) = self
            .cache
            .put(subject_id, entry, self.status_ttl_seconds)
            .await
        {
            warn!(
                subject_id = %subject_id,
                error = %e,
                event = "status_cache_write_failed",
                "Status cache write failed; durable state is authoritative"
            );
        }
    }

    /// Read the status for a subject, preferring the cache.
    pub async fn get_status(&self, subject_id: Uuid) -> DomainResult<VerificationStatus> {
        match self.cache.get(subject_id).await {
            Ok(Some(entry)) => {
                debug!(subject_id = %subject_id, event = "status_cache_hit", "Status served from cache");
                return Ok(VerificationStatus::from_entry(
                    subject_id,
                    entry,
                    StatusSource::Cache,
                ));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(
                    subject_id = %subject_id,
                    error = %e,
                    event = "status_cache_read_failed",
                    "Status cache unavailable; falling back to durable store"
                );
            }
        }

        let user = self
            .users
            .find_by_id(subject_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "user".to_string(),
            })?;

        let entry = self.entry_for(&user);
        self.cache_put(subject_id, &entry).await;

        Ok(VerificationStatus::from_entry(
            subject_id,
            entry,
            StatusSource::Durable,
        ))
    }

    /// Mark a subject verified: durable write first, then overwrite the
    /// cached entry so the next read reflects the change immediately.
    pub async fn mark_verified(&self, subject_id: Uuid) -> DomainResult<VerificationStatus> {
        let mut user = self
            .users
            .find_by_id(subject_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "user".to_string(),
            })?;

        user.mark_verified(self.clock.now());
        let user = self.users.update(user).await?;

        let entry = self.entry_for(&user);
        self.cache_put(subject_id, &entry).await;

        Ok(VerificationStatus::from_entry(
            subject_id,
            entry,
            StatusSource::Durable,
        ))
    }

    /// Mark the user owning `email` verified, if one exists.
    ///
    /// Returns `Ok(None)` for an unknown email so callers can avoid
    /// disclosing account existence.
    pub async fn mark_verified_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let email = normalize_email(email);
        let Some(mut user) = self.users.find_by_email(&email).await? else {
            debug!(
                identifier = %mask_email(&email),
                event = "status_unknown_identifier",
                "Verification for an email with no account"
            );
            return Ok(None);
        };

        user.mark_verified(self.clock.now());
        let user = self.users.update(user).await?;

        let entry = self.entry_for(&user);
        self.cache_put(user.id, &entry).await;

        Ok(Some(user))
    }
}
