//! Token issuance, verification, refresh and revocation.
//!
//! Expiry is checked against the injected clock rather than the library
//! validator, so the boundary is strict (a token at exactly `exp` is
//! expired) and the whole lifecycle is testable with a manual clock.

use std::sync::Arc;

use chrono::Duration;
use constant_time_eq::constant_time_eq;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::{AccessToken, Claims, TokenPair, TokenType, User};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::UserRepository;
use crate::services::clock::Clock;

use super::config::TokenServiceConfig;
use super::store::RevocationStore;

/// SHA-256 hex digest of a signed token, the stored refresh reference
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Issues and verifies HMAC-signed JWTs and tracks revocations.
pub struct TokenService<U, R>
where
    U: UserRepository,
    R: RevocationStore,
{
    users: Arc<U>,
    revocations: Arc<R>,
    clock: Arc<dyn Clock>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: TokenServiceConfig,
}

impl<U, R> TokenService<U, R>
where
    U: UserRepository,
    R: RevocationStore,
{
    pub fn new(
        users: Arc<U>,
        revocations: Arc<R>,
        clock: Arc<dyn Clock>,
        config: TokenServiceConfig,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced manually against the injected clock; the
        // library check would use wall time and allow leeway.
        validation.validate_exp = false;
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);

        Self {
            users,
            revocations,
            clock,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            config,
        }
    }

    fn access_lifetime(&self) -> Duration {
        Duration::minutes(self.config.access_token_expiry_minutes)
    }

    fn refresh_lifetime(&self) -> Duration {
        Duration::days(self.config.refresh_token_expiry_days)
    }

    fn sign(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            warn!(error = %e, event = "token_sign_failed", "Token signing failed");
            TokenError::GenerationFailed.into()
        })
    }

    /// Decode and signature-check a token; signature, shape, issuer and
    /// audience failures all collapse into `Invalid`.
    fn decode_signed(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid.into())
    }

    /// Issue a fresh access/refresh pair for the subject and persist the
    /// refresh reference, displacing any previously active session.
    pub async fn issue(&self, user_id: Uuid) -> DomainResult<TokenPair> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "user".to_string(),
            })?;

        let now = self.clock.now();
        let access_claims = Claims::new(
            user_id,
            TokenType::Access,
            now,
            self.access_lifetime(),
            &self.config.issuer,
            &self.config.audience,
        );
        let refresh_claims = Claims::new(
            user_id,
            TokenType::Refresh,
            now,
            self.refresh_lifetime(),
            &self.config.issuer,
            &self.config.audience,
        );

        let access_token = self.sign(&access_claims)?;
        let refresh_token = self.sign(&refresh_claims)?;

        user.set_refresh_reference(hash_token(&refresh_token), now);
        self.users.update(user).await?;

        info!(
            user_id = %user_id,
            event = "token_pair_issued",
            "Issued access and refresh tokens"
        );

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_lifetime().num_seconds(),
            refresh_expires_in: self.refresh_lifetime().num_seconds(),
        })
    }

    /// Verify an access token: signature, type tag, strict expiry, then
    /// the revocation list.
    pub async fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.decode_signed(token)?;
        if claims.typ != TokenType::Access {
            return Err(TokenError::Invalid.into());
        }
        if claims.is_expired(self.clock.now()) {
            return Err(TokenError::Expired.into());
        }
        if self.revocations.is_revoked(&claims.jti).await? {
            return Err(TokenError::Revoked.into());
        }
        Ok(claims)
    }

    /// Exchange a valid refresh token for a fresh access token.
    ///
    /// The presented token must hash to the reference stored against the
    /// subject; anything else is a stale session. No refresh rotation:
    /// the refresh token stays valid until expiry or revocation.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AccessToken> {
        let claims = self.decode_signed(refresh_token)?;
        if claims.typ != TokenType::Refresh {
            return Err(TokenError::Invalid.into());
        }
        let now = self.clock.now();
        if claims.is_expired(now) {
            return Err(TokenError::Expired.into());
        }
        if self.revocations.is_revoked(&claims.jti).await? {
            return Err(TokenError::Revoked.into());
        }

        let user_id = claims.user_id().map_err(|_| TokenError::Invalid)?;
        let user: User = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(TokenError::Invalid)?;

        let presented = hash_token(refresh_token);
        let current = user
            .refresh_token_hash
            .as_deref()
            .ok_or(TokenError::Stale)?;
        if !constant_time_eq(presented.as_bytes(), current.as_bytes()) {
            return Err(TokenError::Stale.into());
        }

        let access_claims = Claims::new(
            user_id,
            TokenType::Access,
            now,
            self.access_lifetime(),
            &self.config.issuer,
            &self.config.audience,
        );
        let access_token = self.sign(&access_claims)?;

        info!(
            user_id = %user_id,
            event = "token_refreshed",
            "Minted access token from refresh token"
        );

        Ok(AccessToken {
            access_token,
            expires_in: self.access_lifetime().num_seconds(),
        })
    }

    /// Revoke a token for the remainder of its lifetime.
    ///
    /// Claims are read without verifying the signature: revocation must
    /// work for tokens the caller can no longer prove valid, and
    /// revoking an id that was never issued is harmless. Tokens that do
    /// not parse at all are a no-op.
    pub async fn revoke(&self, token: &str) -> DomainResult<()> {
        let mut insecure = Validation::new(Algorithm::HS256);
        insecure.insecure_disable_signature_validation();
        insecure.validate_exp = false;
        insecure.required_spec_claims.clear();

        let claims = match decode::<Claims>(token, &self.decoding_key, &insecure) {
            Ok(data) => data.claims,
            Err(_) => return Ok(()),
        };

        let now = self.clock.now();
        let remaining = claims.remaining_seconds(now);
        if remaining > 0 {
            self.revocations.revoke(&claims.jti, remaining).await?;
        }

        // Revoking a refresh token ends the session: drop the stored
        // reference so the pair cannot be refreshed again.
        if claims.typ == TokenType::Refresh {
            if let Ok(user_id) = claims.user_id() {
                if let Some(mut user) = self.users.find_by_id(user_id).await? {
                    user.record_logout(now);
                    self.users.update(user).await?;
                }
            }
        }

        info!(
            jti = %claims.jti,
            event = "token_revoked",
            "Token revoked"
        );
        Ok(())
    }
}
