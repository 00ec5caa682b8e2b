//! Redis-backed verification status cache.
//!
//! Entries are JSON under `status:{subject_id}` with the configured
//! status TTL. Corrupt entries are dropped and reported as misses so a
//! bad write can never wedge a subject's status reads.

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;
use vf_core::errors::StoreError;
use vf_core::services::verification::types::StatusEntry;
use vf_core::services::StatusCache;

use super::redis_client::RedisClient;

pub struct RedisStatusCache {
    client: RedisClient,
}

impl RedisStatusCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(subject_id: Uuid) -> String {
        format!("status:{subject_id}")
    }
}

#[async_trait]
impl StatusCache for RedisStatusCache {
    async fn get(&self, subject_id: Uuid) -> Result<Option<StatusEntry>, StoreError> {
        let key = Self::key(subject_id);
        let Some(raw) = self.client.get(&key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!(key = %key, error = %e, "Corrupt status entry in cache; evicting");
                let _ = self.client.delete(&key).await;
                Ok(None)
            }
        }
    }

    async fn put(
        &self,
        subject_id: Uuid,
        entry: &StatusEntry,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let payload = serde_json::to_string(entry)
            .map_err(|e| StoreError::Corrupt(format!("unencodable status entry: {e}")))?;
        self.client
            .set_with_expiry(&Self::key(subject_id), &payload, ttl_seconds)
            .await
    }

    async fn invalidate(&self, subject_id: Uuid) -> Result<(), StoreError> {
        self.client.delete(&Self::key(subject_id)).await?;
        Ok(())
    }
}
