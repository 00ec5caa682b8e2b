//! Outbound mail: HTTP provider for production, logging mock for
//! development and tests.

pub mod http_mailer;
pub mod mock_mailer;

pub use http_mailer::{HttpMailer, MailerConfig};
pub use mock_mailer::MockMailer;

use vf_core::domain::entities::OtpPurpose;

/// Subject line per purpose
pub(crate) fn subject_for(purpose: OtpPurpose) -> &'static str {
    match purpose {
        OtpPurpose::Signup => "Confirm your email address",
        OtpPurpose::Login => "Your sign-in code",
        OtpPurpose::EmailChange => "Confirm your new email address",
    }
}

/// Plain-text body carrying the code
pub(crate) fn body_for(code: &str, display_name: Option<&str>, purpose: OtpPurpose) -> String {
    let greeting = match display_name {
        Some(name) => format!("Hi {name},"),
        None => "Hi,".to_string(),
    };
    let minutes = purpose.ttl().num_minutes();
    format!(
        "{greeting}\n\nYour verification code is {code}. It expires in {minutes} minutes.\n\n\
         If you did not request this code, you can ignore this message."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_includes_code_and_lifetime() {
        let body = body_for("204861", Some("Ada"), OtpPurpose::Signup);
        assert!(body.contains("Hi Ada,"));
        assert!(body.contains("204861"));
        assert!(body.contains("15 minutes"));
    }

    #[test]
    fn body_without_display_name_uses_plain_greeting() {
        let body = body_for("204861", None, OtpPurpose::Login);
        assert!(body.starts_with("Hi,"));
        assert!(body.contains("10 minutes"));
    }
}
