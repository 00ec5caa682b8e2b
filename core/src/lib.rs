//! # Veriflow Core
//!
//! Core business logic and domain layer for the Veriflow backend.
//! This crate contains domain entities, business services, repository
//! interfaces, and error types. All external effects (cache, durable
//! store, outbound email) sit behind async traits so that services can
//! be constructed with fakes in tests.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
