//! Cache-aside status flows against fake stores

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainError;
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::clock::test_support::ManualClock;
use crate::services::verification::memory::InMemoryStatusCache;
use crate::services::verification::types::StatusSource;
use crate::services::verification::VerificationStatusService;

const TTL: u64 = 3 * 24 * 3600;

struct Harness {
    users: Arc<MockUserRepository>,
    cache: Arc<InMemoryStatusCache>,
    service: VerificationStatusService<MockUserRepository, InMemoryStatusCache>,
    user_id: Uuid,
}

fn harness_with(user: User) -> Harness {
    let user_id = user.id;
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    ));
    let users = Arc::new(MockUserRepository::new().with_user(user));
    let cache = Arc::new(InMemoryStatusCache::new());
    let service = VerificationStatusService::new(users.clone(), cache.clone(), clock, TTL);
    Harness {
        users,
        cache,
        service,
        user_id,
    }
}

fn harness() -> Harness {
    harness_with(User::new("user@example.com".into()))
}

#[tokio::test]
async fn first_read_comes_from_the_durable_store_and_populates_the_cache() {
    let h = harness();

    let status = h.service.get_status(h.user_id).await.unwrap();
    assert_eq!(status.source, StatusSource::Durable);
    assert!(!status.verified);

    assert!(h.cache.entry(h.user_id).is_some());
    assert_eq!(h.cache.ttl(h.user_id), Some(TTL));

    let again = h.service.get_status(h.user_id).await.unwrap();
    assert_eq!(again.source, StatusSource::Cache);
    assert_eq!(again.verified, status.verified);
}

#[tokio::test]
async fn cache_outage_falls_back_to_the_durable_store() {
    let h = harness();
    h.cache.set_failing(true);

    let status = h.service.get_status(h.user_id).await.unwrap();
    assert_eq!(status.source, StatusSource::Durable);
    assert!(!status.verified);
    // The repopulation write also failed; nothing cached
    assert_eq!(h.cache.put_count(), 0);
}

#[tokio::test]
async fn unknown_subject_is_not_found() {
    let h = harness();
    let err = h.service.get_status(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn durable_outage_fails_the_read_when_the_cache_misses() {
    let h = harness();
    h.users.set_failing(true);
    let err = h.service.get_status(h.user_id).await.unwrap_err();
    assert!(matches!(err, DomainError::Unavailable { .. }));
}

#[tokio::test]
async fn mark_verified_updates_durable_state_and_cache_together() {
    let h = harness();

    // Seed a stale unverified entry
    h.service.get_status(h.user_id).await.unwrap();
    assert!(!h.cache.entry(h.user_id).unwrap().verified);

    let status = h.service.mark_verified(h.user_id).await.unwrap();
    assert!(status.verified);
    assert!(status.verified_at.is_some());

    let stored = h.users.find_by_id(h.user_id).await.unwrap().unwrap();
    assert!(stored.verified);

    let cached = h.cache.entry(h.user_id).unwrap();
    assert!(cached.verified);

    let read = h.service.get_status(h.user_id).await.unwrap();
    assert_eq!(read.source, StatusSource::Cache);
    assert!(read.verified);
}

#[tokio::test]
async fn mark_verified_survives_a_cache_outage() {
    let h = harness();
    h.cache.set_failing(true);

    let status = h.service.mark_verified(h.user_id).await.unwrap();
    assert!(status.verified);

    let stored = h.users.find_by_id(h.user_id).await.unwrap().unwrap();
    assert!(stored.verified);
}

#[tokio::test]
async fn mark_verified_by_email_hides_unknown_accounts() {
    let h = harness();

    let updated = h
        .service
        .mark_verified_by_email("user@example.com")
        .await
        .unwrap();
    assert!(updated.unwrap().verified);

    let missing = h
        .service
        .mark_verified_by_email("nobody@example.com")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn age_is_derived_from_the_birth_date() {
    let mut user = User::new("user@example.com".into());
    user.birth_date = NaiveDate::from_ymd_opt(2000, 5, 31);
    let h = harness_with(user);

    let status = h.service.get_status(h.user_id).await.unwrap();
    assert_eq!(status.age, Some(24));

    let cached = h.cache.entry(h.user_id).unwrap();
    assert_eq!(cached.age, Some(24));
}
