//! Logging mail provider for development and tests.
//!
//! Never sends anything; logs the masked recipient and records the
//! message so tests can assert on delivery.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;
use vf_core::domain::entities::OtpPurpose;
use vf_core::services::otp::traits::{Notifier, NotifyError};
use vf_shared::utils::email::mask_email;

/// A message the mock accepted
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub code: String,
    pub purpose: OtpPurpose,
}

#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockMailer {
    async fn send_code(
        &self,
        email: &str,
        _display_name: Option<&str>,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<String, NotifyError> {
        info!(
            recipient = %mask_email(email),
            purpose = purpose.as_str(),
            "Mock mailer accepted a verification code"
        );
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMail {
            to: email.to_string(),
            code: code.to_string(),
            purpose,
        });
        Ok(format!("mock-{}", sent.len()))
    }
}
