//! Business services

pub mod clock;
pub mod otp;
pub mod rate_limit;
pub mod token;
pub mod verification;

pub use clock::{Clock, SystemClock};
pub use otp::{Notifier, OtpService, OtpStore};
pub use rate_limit::{RateLimitDecision, RateLimitStore, RateLimiter};
pub use token::{RevocationStore, TokenService, TokenServiceConfig};
pub use verification::{StatusCache, VerificationStatus, VerificationStatusService};
