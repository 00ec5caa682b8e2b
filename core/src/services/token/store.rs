//! Revocation list seam

use async_trait::async_trait;

use crate::errors::StoreError;

/// TTL-bearing set of revoked token ids.
///
/// Entries only need to outlive the token they revoke; implementations
/// expire them at the supplied TTL so the set stays bounded by the
/// number of tokens revoked within one token lifetime.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Add a token id to the revocation set for `ttl_seconds`
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), StoreError>;

    /// Whether the token id is currently revoked
    async fn is_revoked(&self, jti: &str) -> Result<bool, StoreError>;
}
