//! Redis-backed OTP record store.
//!
//! Records are stored as JSON under `otp:{purpose}:{identifier}` with
//! the record's TTL, so expiry enforcement and memory reclamation both
//! come from Redis itself. Consume maps to GETDEL, which gives the
//! exactly-once guarantee under concurrent verification.

use async_trait::async_trait;
use tracing::warn;
use vf_core::domain::entities::{OtpPurpose, OtpRecord};
use vf_core::errors::StoreError;
use vf_core::services::OtpStore;

use super::redis_client::RedisClient;

pub struct RedisOtpStore {
    client: RedisClient,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(identifier: &str, purpose: OtpPurpose) -> String {
        format!("otp:{}:{}", purpose.as_str(), identifier)
    }

    fn decode(key: &str, raw: String) -> Result<OtpRecord, StoreError> {
        serde_json::from_str(&raw).map_err(|e| {
            warn!(key = key, error = %e, "Corrupt OTP record in cache");
            StoreError::Corrupt(format!("undecodable OTP record: {e}"))
        })
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn put(&self, record: &OtpRecord, ttl_seconds: u64) -> Result<(), StoreError> {
        let key = Self::key(&record.identifier, record.purpose);
        let payload = serde_json::to_string(record)
            .map_err(|e| StoreError::Corrupt(format!("unencodable OTP record: {e}")))?;
        self.client.set_with_expiry(&key, &payload, ttl_seconds).await
    }

    async fn get(
        &self,
        identifier: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, StoreError> {
        let key = Self::key(identifier, purpose);
        match self.client.get(&key).await? {
            Some(raw) => Ok(Some(Self::decode(&key, raw)?)),
            None => Ok(None),
        }
    }

    async fn consume(
        &self,
        identifier: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, StoreError> {
        let key = Self::key(identifier, purpose);
        match self.client.get_del(&key).await? {
            Some(raw) => Ok(Some(Self::decode(&key, raw)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, record: &OtpRecord) -> Result<(), StoreError> {
        let key = Self::key(&record.identifier, record.purpose);
        let payload = serde_json::to_string(record)
            .map_err(|e| StoreError::Corrupt(format!("unencodable OTP record: {e}")))?;
        // KEEPTTL+XX: rewrite in place without extending the lifetime;
        // if the record expired meanwhile, do not resurrect it.
        self.client.set_keep_ttl(&key, &payload).await?;
        Ok(())
    }
}
