//! Process-local OTP record store.
//!
//! Used in tests and local development. Recorded TTLs are not enforced;
//! the service checks expiry against its own clock, so the TTL only
//! matters for memory reclamation, which a process-local map can skip.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::entities::{OtpPurpose, OtpRecord};
use crate::errors::StoreError;

use super::traits::OtpStore;

/// Map-backed OTP store keyed by `(identifier, purpose)`
#[derive(Default)]
pub struct InMemoryOtpStore {
    records: Mutex<HashMap<(String, OtpPurpose), (OtpRecord, u64)>>,
    /// When set, every call fails with `Unavailable`; used to exercise
    /// store outage paths in tests.
    fail: Mutex<bool>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated outage
    pub fn set_failing(&self, failing: bool) {
        *self.fail.lock().unwrap() = failing;
    }

    /// TTL recorded with the most recent `put` for the pair
    pub fn last_ttl(&self, identifier: &str, purpose: OtpPurpose) -> Option<u64> {
        self.records
            .lock()
            .unwrap()
            .get(&(identifier.to_string(), purpose))
            .map(|(_, ttl)| *ttl)
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
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, record: &OtpRecord, ttl_seconds: u64) -> Result<(), StoreError> {
        self.check()?;
        self.records.lock().unwrap().insert(
            (record.identifier.clone(), record.purpose),
            (record.clone(), ttl_seconds),
        );
        Ok(())
    }

    async fn get(
        &self,
        identifier: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, StoreError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&(identifier.to_string(), purpose))
            .map(|(record, _)| record.clone()))
    }

    async fn consume(
        &self,
        identifier: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, StoreError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .remove(&(identifier.to_string(), purpose))
            .map(|(record, _)| record))
    }

    async fn update(&self, record: &OtpRecord) -> Result<(), StoreError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let key = (record.identifier.clone(), record.purpose);
        match records.get_mut(&key) {
            Some((existing, _)) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(StoreError::Corrupt("update of absent record".into())),
        }
    }
}
