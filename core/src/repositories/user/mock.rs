//! In-memory UserRepository for tests and local development

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::UserRepository;

/// HashMap-backed repository. Not suitable for production; state is
/// per-process and lost on restart.
#[derive(Default)]
pub struct MockUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
    /// When set, every call fails with `Unavailable`; used to exercise
    /// durable-store outage paths in tests.
    fail: Mutex<bool>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with a user
    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().insert(user.id, user);
        self
    }

    /// Toggle simulated outage
    pub fn set_failing(&self, failing: bool) {
        *self.fail.lock().unwrap() = failing;
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if *self.fail.lock().unwrap() {
            return Err(DomainError::Unavailable {
                message: "user store down".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict {
                message: "email already registered".to_string(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "user".to_string(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let repo = MockUserRepository::new();
        let user = User::new("user@example.com".into());
        let created = repo.create(user.clone()).await.unwrap();
        assert_eq!(created.id, user.id);

        let found = repo.find_by_email("user@example.com").await.unwrap();
        assert_eq!(found.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = MockUserRepository::new();
        repo.create(User::new("user@example.com".into())).await.unwrap();
        let err = repo
            .create(User::new("user@example.com".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn simulated_outage_fails_every_call() {
        let repo = MockUserRepository::new();
        repo.set_failing(true);
        let err = repo.find_by_email("user@example.com").await.unwrap_err();
        assert!(matches!(err, DomainError::Unavailable { .. }));
    }
}
