//! Data models
//!
//! Shared between access-server and its API clients (the admin dashboard).
//! JSON field names follow the dashboard's camelCase contract.

pub mod access;
pub mod auth;
pub mod employee;
pub mod platform;

// Re-exports
pub use access::*;
pub use auth::*;
pub use employee::*;
pub use platform::*;
