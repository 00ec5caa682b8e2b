//! Common API response envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generic success envelope for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response payload
    pub data: T,

    /// Timestamp the response was produced
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_payload_with_timestamp() {
        let response = ApiResponse::new("ok");
        assert_eq!(response.data, "ok");
        assert!(response.timestamp <= Utc::now());
    }
}
