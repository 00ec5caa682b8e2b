//! Store and delivery seams for the OTP service

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{OtpPurpose, OtpRecord};
use crate::errors::StoreError;

/// TTL-bearing store for pending verification codes.
///
/// Implementations key records by `(identifier, purpose)`; a second
/// `put` for the same pair replaces the previous record and its TTL.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Store a record, replacing any existing one for the same pair
    async fn put(&self, record: &OtpRecord, ttl_seconds: u64) -> Result<(), StoreError>;

    /// Fetch the record for the pair without consuming it
    async fn get(
        &self,
        identifier: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, StoreError>;

    /// Atomically fetch and delete the record for the pair.
    ///
    /// Under concurrent calls exactly one caller observes `Some`; the
    /// rest observe `None`.
    async fn consume(
        &self,
        identifier: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, StoreError>;

    /// Rewrite a record in place, preserving its remaining TTL
    async fn update(&self, record: &OtpRecord) -> Result<(), StoreError>;
}

/// Delivery failure, carried for logging only
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct NotifyError(pub String);

/// Outbound code delivery.
///
/// Delivery is fire-and-forget from the service's point of view: a slow
/// or failing provider must not block or fail the issue request.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a code to the recipient; returns the provider message id
    async fn send_code(
        &self,
        email: &str,
        display_name: Option<&str>,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<String, NotifyError>;
}
