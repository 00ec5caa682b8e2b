//! Token lifecycle flows against fake stores and a manual clock

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::MockUserRepository;
use crate::repositories::UserRepository;
use crate::services::clock::test_support::ManualClock;
use crate::services::token::config::TokenServiceConfig;
use crate::services::token::memory::InMemoryRevocationStore;
use crate::services::token::service::{hash_token, TokenService};

struct Harness {
    clock: Arc<ManualClock>,
    users: Arc<MockUserRepository>,
    revocations: Arc<InMemoryRevocationStore>,
    service: TokenService<MockUserRepository, InMemoryRevocationStore>,
    user_id: Uuid,
}

fn harness() -> Harness {
    let user = User::new("user@example.com".into());
    let user_id = user.id;
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let users = Arc::new(MockUserRepository::new().with_user(user));
    let revocations = Arc::new(InMemoryRevocationStore::new());
    let service = TokenService::new(
        users.clone(),
        revocations.clone(),
        clock.clone(),
        TokenServiceConfig::default(),
    );
    Harness {
        clock,
        users,
        revocations,
        service,
        user_id,
    }
}

#[tokio::test]
async fn issued_access_token_verifies() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();
    assert_eq!(pair.expires_in, 15 * 60);
    assert_eq!(pair.refresh_expires_in, 7 * 24 * 3600);

    let claims = h.service.verify_access_token(&pair.access_token).await.unwrap();
    assert_eq!(claims.user_id().unwrap(), h.user_id);
}

#[tokio::test]
async fn issuance_persists_the_refresh_reference() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();

    let stored = h.users.find_by_id(h.user_id).await.unwrap().unwrap();
    assert_eq!(
        stored.refresh_token_hash.as_deref(),
        Some(hash_token(&pair.refresh_token).as_str())
    );
    assert!(stored.last_login_at.is_some());
}

#[tokio::test]
async fn issue_for_unknown_subject_is_not_found() {
    let h = harness();
    let err = h.service.issue(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn expired_access_token_is_rejected_even_with_valid_signature() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();

    h.clock.advance(Duration::minutes(15));
    let err = h
        .service
        .verify_access_token(&pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Expired)));
}

#[tokio::test]
async fn tampered_token_is_invalid() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();

    let mut tampered = pair.access_token.clone();
    let replacement = if tampered.ends_with('x') { 'y' } else { 'x' };
    tampered.pop();
    tampered.push(replacement);
    let err = h.service.verify_access_token(&tampered).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Invalid)));

    let err = h
        .service
        .verify_access_token("not.a.token")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Invalid)));
}

#[tokio::test]
async fn refresh_token_cannot_pass_as_access_token() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();
    let err = h
        .service
        .verify_access_token(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Invalid)));
}

#[tokio::test]
async fn refresh_mints_a_working_access_token() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();

    let minted = h.service.refresh(&pair.refresh_token).await.unwrap();
    assert_eq!(minted.expires_in, 15 * 60);

    let claims = h
        .service
        .verify_access_token(&minted.access_token)
        .await
        .unwrap();
    assert_eq!(claims.user_id().unwrap(), h.user_id);
}

#[tokio::test]
async fn access_token_cannot_refresh() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();
    let err = h.service.refresh(&pair.access_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Invalid)));
}

#[tokio::test]
async fn expired_refresh_token_is_rejected() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();

    h.clock.advance(Duration::days(7));
    let err = h.service.refresh(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Expired)));
}

#[tokio::test]
async fn reissue_makes_the_old_refresh_token_stale() {
    let h = harness();
    let old = h.service.issue(h.user_id).await.unwrap();
    let new = h.service.issue(h.user_id).await.unwrap();

    let err = h.service.refresh(&old.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Stale)));

    h.service.refresh(&new.refresh_token).await.unwrap();
}

#[tokio::test]
async fn revoked_access_token_stops_verifying() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();

    h.service.verify_access_token(&pair.access_token).await.unwrap();
    h.service.revoke(&pair.access_token).await.unwrap();

    let err = h
        .service
        .verify_access_token(&pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Revoked)));
}

#[tokio::test]
async fn revoking_a_refresh_token_ends_the_session() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();

    h.service.revoke(&pair.refresh_token).await.unwrap();

    let err = h.service.refresh(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Revoked)));

    let stored = h.users.find_by_id(h.user_id).await.unwrap().unwrap();
    assert!(stored.refresh_token_hash.is_none());
    assert!(stored.last_logout_at.is_some());
}

#[tokio::test]
async fn revocation_ttl_covers_the_remaining_lifetime() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();

    h.clock.advance(Duration::minutes(5));
    h.service.revoke(&pair.access_token).await.unwrap();

    let err = h
        .service
        .verify_access_token(&pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Revoked)));

    // 15-minute token revoked 5 minutes in leaves a 10-minute entry
    assert_eq!(h.revocations.ttls(), vec![10 * 60]);
}

#[tokio::test]
async fn revoking_an_already_expired_token_adds_no_entry() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();

    h.clock.advance(Duration::minutes(20));
    h.service.revoke(&pair.access_token).await.unwrap();
    assert_eq!(h.revocations.len(), 0);
}

#[tokio::test]
async fn revoking_garbage_is_a_no_op() {
    let h = harness();
    h.service.revoke("definitely not a jwt").await.unwrap();
    assert_eq!(h.revocations.len(), 0);
}

#[tokio::test]
async fn refresh_for_a_deleted_subject_is_invalid() {
    let user = User::new("gone@example.com".into());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let users = Arc::new(MockUserRepository::new().with_user(user.clone()));
    let revocations = Arc::new(InMemoryRevocationStore::new());
    let service = TokenService::new(
        users.clone(),
        revocations,
        clock,
        TokenServiceConfig::default(),
    );

    let pair = service.issue(user.id).await.unwrap();

    // Simulate deletion by pointing the service at an empty repository
    let empty = Arc::new(MockUserRepository::new());
    let service = TokenService::new(
        empty,
        Arc::new(InMemoryRevocationStore::new()),
        Arc::new(ManualClock::new(Utc::now())),
        TokenServiceConfig::default(),
    );
    let err = service.refresh(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Invalid)));
}

#[tokio::test]
async fn revocation_store_outage_surfaces_as_unavailable() {
    let h = harness();
    let pair = h.service.issue(h.user_id).await.unwrap();

    h.revocations.set_failing(true);
    let err = h
        .service
        .verify_access_token(&pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unavailable { .. }));
}
