//! Process-local revocation set for tests and local development.
//!
//! Entry expiry is not simulated; tests assert on the recorded TTLs
//! instead.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::StoreError;

use super::store::RevocationStore;

/// Map-backed revocation set recording each entry's TTL
#[derive(Default)]
pub struct InMemoryRevocationStore {
    entries: Mutex<HashMap<String, u64>>,
    /// When set, every call fails with `Unavailable`; used to exercise
    /// store outage paths in tests.
    fail: Mutex<bool>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated outage
    pub fn set_failing(&self, failing: bool) {
        *self.fail.lock().unwrap() = failing;
    }

    /// TTLs of all live entries, in arbitrary order
    pub fn ttls(&self) -> Vec<u64> {
        self.entries.lock().unwrap().values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), StoreError> {
        if *self.fail.lock().unwrap() {
            Err(StoreError::Unavailable("simulated outage".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(jti.to_string(), ttl_seconds);
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self.entries.lock().unwrap().contains_key(jti))
    }
}
