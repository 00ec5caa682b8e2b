//! Repository interfaces for durable persistence

pub mod user;

pub use user::MockUserRepository;
pub use user::UserRepository;
