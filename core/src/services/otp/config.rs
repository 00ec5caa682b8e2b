//! OTP service configuration

use vf_shared::config::rate_limit::OtpRateLimits;

/// Per-action fixed-window budgets, resolved to seconds
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    pub issue_per_window: u32,
    pub verify_per_window: u32,
    pub resend_per_window: u32,
    pub window_seconds: u64,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self::from(&OtpRateLimits::default())
    }
}

impl From<&OtpRateLimits> for OtpServiceConfig {
    fn from(limits: &OtpRateLimits) -> Self {
        Self {
            issue_per_window: limits.issue_per_window,
            verify_per_window: limits.verify_per_window,
            resend_per_window: limits.resend_per_window,
            window_seconds: limits.window_minutes * 60,
        }
    }
}
