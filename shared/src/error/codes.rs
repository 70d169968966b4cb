//! Unified error codes for the Menulink ordering system
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Tenant errors
//! - 4xxx: Order errors
//! - 6xxx: Menu errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
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

    // ==================== 3xxx: Tenant ====================
    /// No restaurant matches the requested public slug
    TenantNotFound = 3001,
    /// Public slug is already taken by another restaurant
    SlugTaken = 3002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Checkout attempted with an empty cart
    EmptyCart = 4002,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    ItemNotFound = 6001,
    /// Menu category not found
    CategoryNotFound = 6002,
    /// Menu category name already in use for this restaurant
    CategoryExists = 6003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Durable store operation failed
    StorageError = 9002,
    /// Persisted record is not valid serialized data
    StorageParse = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::TenantNotFound => "Restaurant not found",
            Self::SlugTaken => "Slug already taken",
            Self::OrderNotFound => "Order not found",
            Self::EmptyCart => "Cart is empty",
            Self::ItemNotFound => "Menu item not found",
            Self::CategoryNotFound => "Menu category not found",
            Self::CategoryExists => "Menu category already exists",
            Self::InternalError => "Internal error",
            Self::StorageError => "Storage operation failed",
            Self::StorageParse => "Persisted record is malformed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            3001 => Ok(Self::TenantNotFound),
            3002 => Ok(Self::SlugTaken),
            4001 => Ok(Self::OrderNotFound),
            4002 => Ok(Self::EmptyCart),
            6001 => Ok(Self::ItemNotFound),
            6002 => Ok(Self::CategoryNotFound),
            6003 => Ok(Self::CategoryExists),
            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::StorageError),
            9003 => Ok(Self::StorageParse),
            other => Err(format!("unknown error code: {}", other)),
        }
    }
}
