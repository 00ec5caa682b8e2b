//! HTTP mail provider client.
//!
//! Speaks a Mailgun-style messages API: one POST per message with
//! Basic auth, returning a provider message id. Retries transient
//! failures with exponential backoff; the caller already treats
//! delivery as fire-and-forget, so retries happen off the request path.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, warn};
use vf_core::domain::entities::OtpPurpose;
use vf_core::services::otp::traits::{Notifier, NotifyError};
use vf_shared::utils::email::mask_email;

use crate::InfraError;

use super::{body_for, subject_for};

/// Mail provider configuration
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Messages endpoint, e.g. `https://api.mailprovider.com/v1/messages`
    pub api_url: String,
    /// API key, sent as the Basic auth password with user `api`
    pub api_key: String,
    /// From address, e.g. `no-reply@veriflow.io`
    pub from_address: String,
    /// Display name for the from header
    pub from_name: String,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl MailerConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let api_url = std::env::var("MAILER_API_URL")
            .map_err(|_| InfraError::Config("MAILER_API_URL not set".to_string()))?;
        let api_key = std::env::var("MAILER_API_KEY")
            .map_err(|_| InfraError::Config("MAILER_API_KEY not set".to_string()))?;
        let from_address = std::env::var("MAILER_FROM_ADDRESS")
            .map_err(|_| InfraError::Config("MAILER_FROM_ADDRESS not set".to_string()))?;

        Ok(Self {
            api_url,
            api_key,
            from_address,
            from_name: std::env::var("MAILER_FROM_NAME").unwrap_or_else(|_| "Veriflow".to_string()),
            max_retries: std::env::var("MAILER_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("MAILER_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            request_timeout_secs: std::env::var("MAILER_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: Option<String>,
}

pub struct HttpMailer {
    client: reqwest::Client,
    config: MailerConfig,
    auth_header: String,
}

impl HttpMailer {
    pub fn new(config: MailerConfig) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let auth_header = format!(
            "Basic {}",
            BASE64.encode(format!("api:{}", config.api_key))
        );

        info!(from = %config.from_address, "Mail provider client ready");

        Ok(Self {
            client,
            config,
            auth_header,
        })
    }

    pub fn from_env() -> Result<Self, InfraError> {
        Self::new(MailerConfig::from_env()?)
    }

    async fn post_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, NotifyError> {
        let payload = serde_json::json!({
            "from": format!("{} <{}>", self.config.from_name, self.config.from_address),
            "to": to,
            "subject": subject,
            "text": body,
        });

        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;

            let result = self
                .client
                .post(&self.config.api_url)
                .header("Authorization", &self.auth_header)
                .json(&payload)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    let parsed: SendResponse = response
                        .json()
                        .await
                        .unwrap_or(SendResponse { id: None });
                    let id = parsed.id.unwrap_or_else(|| "unknown".to_string());
                    debug!(message_id = %id, "Mail accepted by provider");
                    return Ok(id);
                }
                Ok(response) if retriable_status(response.status()) && attempts < self.config.max_retries => {
                    warn!(
                        status = %response.status(),
                        attempt = attempts,
                        "Mail provider rejected request; retrying in {}ms",
                        delay
                    );
                }
                Ok(response) => {
                    return Err(NotifyError(format!(
                        "mail provider returned {}",
                        response.status()
                    )));
                }
                Err(e) if attempts < self.config.max_retries => {
                    warn!(
                        error = %e,
                        attempt = attempts,
                        "Mail provider request failed; retrying in {}ms",
                        delay
                    );
                }
                Err(e) => {
                    return Err(NotifyError(format!("mail provider request failed: {e}")));
                }
            }

            tokio::time::sleep(Duration::from_millis(delay)).await;
            delay = (delay * 2).min(10_000);
        }
    }
}

fn retriable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn send_code(
        &self,
        email: &str,
        display_name: Option<&str>,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<String, NotifyError> {
        debug!(
            recipient = %mask_email(email),
            purpose = purpose.as_str(),
            "Dispatching verification code"
        );

        let subject = subject_for(purpose);
        let body = body_for(code, display_name, purpose);
        self.post_message(email, subject, &body).await
    }
}
