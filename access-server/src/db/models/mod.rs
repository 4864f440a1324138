//! Database Models
//!
//! Row types as stored in SurrealDB. Record keys are read back through a
//! `record::id(id) AS key` projection so every row carries its plain key.

// Auth
pub mod admin;

// Directory
pub mod employee;

// Credentials
pub mod platform;

// Re-exports
pub use admin::Admin;
pub use employee::EmployeeRecord;
pub use platform::PlatformRecord;
