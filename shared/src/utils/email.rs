//! Email identifier utilities
//!
//! Identifiers throughout the system are normalized email addresses.
//! Raw addresses never appear in log output; use [`mask_email`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Practical email shape check. Full RFC 5322 validation is deliberately
/// out of scope; the address is only proven by OTP delivery anyway.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Maximum accepted identifier length
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Normalize an email identifier: trim surrounding whitespace and lowercase.
///
/// All storage keys and lookups use the normalized form so that the same
/// mailbox cannot hold several concurrent OTP records under case variants.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Check whether a normalized identifier looks like an email address
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= MAX_EMAIL_LENGTH && EMAIL_RE.is_match(email)
}

/// Mask an email address for logging: keep the first character of the
/// local part and the domain, e.g. `a***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
    }

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
    }

    #[test]
    fn rejects_overlong_addresses() {
        let local = "a".repeat(250);
        assert!(!is_valid_email(&format!("{}@example.com", local)));
    }

    #[test]
    fn masks_addresses_for_logging() {
        assert_eq!(mask_email("user@example.com"), "u***@example.com");
        assert_eq!(mask_email("bogus"), "***");
    }
}
