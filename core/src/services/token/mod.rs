//! JWT access/refresh token lifecycle: issuance, verification, refresh
//! and revocation.

pub mod config;
pub mod memory;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use memory::InMemoryRevocationStore;
pub use service::TokenService;
pub use store::RevocationStore;
