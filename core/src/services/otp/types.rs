//! OTP service result types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of issuing or resending a code. The code itself is never
/// returned to the caller; it travels only through the notifier.
#[derive(Debug, Clone, Serialize)]
pub struct IssueResult {
    /// When the issued code expires
    pub expires_at: DateTime<Utc>,

    /// Seconds until the issued code expires
    pub expires_in_seconds: u64,
}
