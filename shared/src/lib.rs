//! Shared utilities and common types for the Veriflow server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Common response structures
//! - Utility functions (email normalization, masking, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, RateLimitConfig, ServerConfig,
};
pub use types::response::ApiResponse;
pub use utils::email;
