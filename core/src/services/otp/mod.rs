//! One-time passcode issuance and verification.
//!
//! Codes live exclusively in the cache store behind [`OtpStore`]; losing
//! the store loses pending codes but never corrupts account state, since
//! verified status is persisted durably elsewhere.

pub mod config;
pub mod memory;
pub mod service;
pub mod traits;
pub mod types;


pub use config::OtpServiceConfig;
pub use memory::InMemoryOtpStore;
pub use service::OtpService;
pub use traits::{Notifier, NotifyError, OtpStore};
pub use types::IssueResult;
