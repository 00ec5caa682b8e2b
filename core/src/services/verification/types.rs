//! Verification status types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which layer answered a status read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSource {
    Cache,
    Durable,
}

/// Status facts as cached, without the subject id (the cache key)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub age: Option<u32>,
}

/// A status read as returned to callers, tagged with its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationStatus {
    pub subject_id: Uuid,
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,

    /// Whole years derived from the stored birth date, when known
    pub age: Option<u32>,

    pub source: StatusSource,
}

impl VerificationStatus {
    pub(crate) fn from_entry(subject_id: Uuid, entry: StatusEntry, source: StatusSource) -> Self {
        Self {
            subject_id,
            verified: entry.verified,
            verified_at: entry.verified_at,
            age: entry.age,
            source,
        }
    }
}
