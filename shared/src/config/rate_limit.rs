//! Rate limiting configuration module
//!
//! Budgets are fixed-window per (action, identifier) pair. The windows
//! for the OTP endpoints share a single 15-minute duration; each action
//! carries its own ceiling.

use serde::{Deserialize, Serialize};

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// OTP budgets
    pub otp: OtpRateLimits,
}

/// Fixed-window budgets for the OTP endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpRateLimits {
    /// Max issuance requests per identifier per window
    pub issue_per_window: u32,

    /// Max verification attempts per identifier per window
    pub verify_per_window: u32,

    /// Max resend requests per identifier per window
    pub resend_per_window: u32,

    /// Window duration in minutes shared by the budgets above
    pub window_minutes: u64,
}

impl Default for OtpRateLimits {
    fn default() -> Self {
        Self {
            issue_per_window: 5,
            verify_per_window: 10,
            resend_per_window: 3,
            window_minutes: 15,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            otp: OtpRateLimits::default(),
        }
    }
}

impl RateLimitConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            enabled: true,
            otp: OtpRateLimits {
                issue_per_window: 50,
                verify_per_window: 100,
                resend_per_window: 30,
                window_minutes: 15,
            },
        }
    }

    /// Create a production configuration (strict limits)
    pub fn production() -> Self {
        Self::default()
    }
}

fn default_enabled() -> bool {
    true
}
