//! User repository trait defining the interface for user persistence.
//!
//! This is the durable-store adapter boundary: the core only needs to
//! look users up by identifier or id and write status fields back.
//! Implementations must be idempotent under retry.

pub mod mock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

pub use mock::MockUserRepository;

/// Repository contract for the durable User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user. Fails with `Conflict` if the email is taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user, returning the stored state
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
