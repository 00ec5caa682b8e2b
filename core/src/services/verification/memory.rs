//! Process-local status cache for tests and local development.
//!
//! Recorded TTLs are not enforced; the durable store stays
//! authoritative regardless, so a stale local entry only affects the
//! `source` tag of a read.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::StoreError;

use super::traits::StatusCache;
use super::types::StatusEntry;

/// Map-backed status cache keyed by subject id
#[derive(Default)]
pub struct InMemoryStatusCache {
    entries: Mutex<HashMap<Uuid, (StatusEntry, u64)>>,
    /// When set, every call fails with `Unavailable`; used to exercise
    /// cache outage paths in tests.
    fail: Mutex<bool>,
    put_count: Mutex<usize>,
}

impl InMemoryStatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated outage
    pub fn set_failing(&self, failing: bool) {
        *self.fail.lock().unwrap() = failing;
    }

    /// Cached entry for the subject, if any
    pub fn entry(&self, subject_id: Uuid) -> Option<StatusEntry> {
        self.entries
            .lock()
            .unwrap()
            .get(&subject_id)
            .map(|(entry, _)| entry.clone())
    }

    /// TTL recorded with the subject's entry, if any
    pub fn ttl(&self, subject_id: Uuid) -> Option<u64> {
        self.entries
            .lock()
            .unwrap()
            .get(&subject_id)
            .map(|(_, ttl)| *ttl)
    }

    /// Number of successful writes, for best-effort-write assertions
    pub fn put_count(&self) -> usize {
        *self.put_count.lock().unwrap()
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
impl StatusCache for InMemoryStatusCache {
    async fn get(&self, subject_id: Uuid) -> Result<Option<StatusEntry>, StoreError> {
        self.check()?;
        Ok(self.entry(subject_id))
    }

    async fn put(
        &self,
        subject_id: Uuid,
        entry: &StatusEntry,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        self.check()?;
        *self.put_count.lock().unwrap() += 1;
        self.entries
            .lock()
            .unwrap()
            .insert(subject_id, (entry.clone(), ttl_seconds));
        Ok(())
    }

    async fn invalidate(&self, subject_id: Uuid) -> Result<(), StoreError> {
        self.check()?;
        self.entries.lock().unwrap().remove(&subject_id);
        Ok(())
    }
}
