//! Cache seam for verification status

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::StoreError;

use super::types::StatusEntry;

/// TTL-bearing cache of status entries keyed by subject id
#[async_trait]
pub trait StatusCache: Send + Sync {
    async fn get(&self, subject_id: Uuid) -> Result<Option<StatusEntry>, StoreError>;

    async fn put(
        &self,
        subject_id: Uuid,
        entry: &StatusEntry,
        ttl_seconds: u64,
    ) -> Result<(), StoreError>;

    async fn invalidate(&self, subject_id: Uuid) -> Result<(), StoreError>;
}
