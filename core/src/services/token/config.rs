//! Token service configuration

use vf_shared::config::AuthConfig;

/// Signing and lifetime parameters for issued tokens
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    pub jwt_secret: String,
    pub access_token_expiry_minutes: i64,
    pub refresh_token_expiry_days: i64,
    pub issuer: String,
    pub audience: String,
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(auth: &AuthConfig) -> Self {
        Self {
            jwt_secret: auth.jwt_secret.clone(),
            access_token_expiry_minutes: auth.access_token_expiry_minutes,
            refresh_token_expiry_days: auth.refresh_token_expiry_days,
            issuer: auth.issuer.clone(),
            audience: auth.audience.clone(),
        }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}
