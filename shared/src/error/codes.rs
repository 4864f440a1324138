//! Unified error codes for the access service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Directory (employee) errors
//! - 4xxx: Platform / access reconciliation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the dashboard can switch
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Refresh token is unknown, rotated away or revoked by logout
    RefreshTokenRevoked = 1005,

    // ==================== 3xxx: Directory ====================
    /// Employee not found
    EmployeeNotFound = 3001,
    /// Employee email already in use
    EmployeeEmailExists = 3002,
    /// A submitted platform link is incomplete
    InvalidPlatformLink = 3003,

    // ==================== 4xxx: Platform ====================
    /// Platform credential record not found
    PlatformNotFound = 4001,
    /// Platform name already registered
    PlatformNameExists = 4002,
    /// Platform credential missing or incomplete
    PlatformNotConfigured = 4003,
    /// Employee has no account on the requested platform
    PlatformNotLinked = 4004,
    /// Platform does not recognize the account
    PlatformAccountNotFound = 4005,
    /// Platform rejected the stored credential
    PlatformForbidden = 4006,
    /// Platform returned an unexpected status or could not be reached
    PlatformUpstreamError = 4007,
    /// Operation is not available for this platform
    PlatformUnsupported = 4008,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::RefreshTokenRevoked => "Invalid refresh token",

            // Directory
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee email already exists",
            ErrorCode::InvalidPlatformLink => {
                "Each platform must include platformName and accountId"
            }

            // Platform
            ErrorCode::PlatformNotFound => "Platform not found",
            ErrorCode::PlatformNameExists => "Platform name already exists",
            ErrorCode::PlatformNotConfigured => "Platform integration not properly configured",
            ErrorCode::PlatformNotLinked => "Platform account not linked to this employee",
            ErrorCode::PlatformAccountNotFound => "Platform account not found",
            ErrorCode::PlatformForbidden => "Invalid platform token or insufficient permissions",
            ErrorCode::PlatformUpstreamError => "Platform request failed",
            ErrorCode::PlatformUnsupported => "Operation not supported for this platform",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::RefreshTokenRevoked),

            // Directory
            3001 => Ok(ErrorCode::EmployeeNotFound),
            3002 => Ok(ErrorCode::EmployeeEmailExists),
            3003 => Ok(ErrorCode::InvalidPlatformLink),

            // Platform
            4001 => Ok(ErrorCode::PlatformNotFound),
            4002 => Ok(ErrorCode::PlatformNameExists),
            4003 => Ok(ErrorCode::PlatformNotConfigured),
            4004 => Ok(ErrorCode::PlatformNotLinked),
            4005 => Ok(ErrorCode::PlatformAccountNotFound),
            4006 => Ok(ErrorCode::PlatformForbidden),
            4007 => Ok(ErrorCode::PlatformUpstreamError),
            4008 => Ok(ErrorCode::PlatformUnsupported),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
