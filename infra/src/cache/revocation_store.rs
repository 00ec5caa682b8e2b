//! Redis-backed revocation set.
//!
//! One key per revoked token id, expiring with the token's remaining
//! lifetime, so the set never outgrows the number of tokens revoked
//! within one token lifetime.

use async_trait::async_trait;
use vf_core::errors::StoreError;
use vf_core::services::RevocationStore;

use super::redis_client::RedisClient;

pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(jti: &str) -> String {
        format!("revoked:{jti}")
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        self.client
            .set_with_expiry(&Self::key(jti), "1", ttl_seconds)
            .await
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, StoreError> {
        self.client.exists(&Self::key(jti)).await
    }
}
