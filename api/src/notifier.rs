//! Mail provider selection.
//!
//! `MAILER_PROVIDER=http` uses the real provider; anything else (the
//! default) logs codes through the mock, which is what development and
//! CI want.

use async_trait::async_trait;
use tracing::warn;

use vf_core::domain::entities::OtpPurpose;
use vf_core::services::otp::traits::{Notifier, NotifyError};
use vf_infra::email::{HttpMailer, MockMailer};
use vf_infra::InfraError;

pub enum Mailer {
    Http(HttpMailer),
    Mock(MockMailer),
}

impl Mailer {
    pub fn from_env() -> Result<Self, InfraError> {
        match std::env::var("MAILER_PROVIDER").as_deref() {
            Ok("http") => Ok(Mailer::Http(HttpMailer::from_env()?)),
            _ => {
                warn!("MAILER_PROVIDER not set to 'http'; codes will only be logged");
                Ok(Mailer::Mock(MockMailer::new()))
            }
        }
    }
}

#[async_trait]
impl Notifier for Mailer {
    async fn send_code(
        &self,
        email: &str,
        display_name: Option<&str>,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<String, NotifyError> {
        match self {
            Mailer::Http(mailer) => mailer.send_code(email, display_name, code, purpose).await,
            Mailer::Mock(mailer) => mailer.send_code(email, display_name, code, purpose).await,
        }
    }
}
