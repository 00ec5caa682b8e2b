//! HTTP layer for the Veriflow verification and token endpoints.
//!
//! Exposed as a library so integration tests can assemble the same
//! routes and state the binary serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod notifier;
pub mod routes;
