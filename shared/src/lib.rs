//! Shared types for the access service
//!
//! Error system, response bodies and the domain DTOs exchanged between
//! access-server and the admin dashboard.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorResponse};
pub use http;
pub use serde::{Deserialize, Serialize};
