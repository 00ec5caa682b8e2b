//! Error types for the core domain

mod domain_error;
mod store_error;

pub use domain_error::{DomainError, DomainResult, OtpError, TokenError, ValidationError};
pub use store_error::StoreError;
