//! Error types and result alias

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type for the ordering core, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (field-level errors, context, etc.)
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a validation error listing the missing/invalid fields
    pub fn validation_fields(fields: &[&str]) -> Self {
        Self::with_message(
            ErrorCode::ValidationFailed,
            format!("Invalid or missing fields: {}", fields.join(", ")),
        )
        .with_detail(
            "fields",
            Value::Array(fields.iter().map(|f| Value::from(*f)).collect()),
        )
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a tenant not found error for a public slug
    pub fn tenant_not_found(slug: impl Into<String>) -> Self {
        let s = slug.into();
        Self::with_message(
            ErrorCode::TenantNotFound,
            format!("No restaurant found for slug '{}'", s),
        )
        .with_detail("slug", s)
    }

    /// Create a slug taken error
    pub fn slug_taken(slug: impl Into<String>) -> Self {
        let s = slug.into();
        Self::with_message(ErrorCode::SlugTaken, format!("Slug '{}' already taken", s))
            .with_detail("slug", s)
    }

    /// Create an empty cart error
    pub fn empty_cart() -> Self {
        Self::new(ErrorCode::EmptyCart)
    }

    /// Create an order not found error
    pub fn order_not_found(order_id: impl Into<String>) -> Self {
        let id = order_id.into();
        Self::with_message(ErrorCode::OrderNotFound, format!("Order '{}' not found", id))
            .with_detail("orderId", id)
    }

    /// Create a menu item not found error
    pub fn item_not_found(item_id: impl Into<String>) -> Self {
        let id = item_id.into();
        Self::with_message(
            ErrorCode::ItemNotFound,
            format!("Menu item '{}' not found", id),
        )
        .with_detail("itemId", id)
    }

    /// Create a category exists error
    pub fn category_exists(name: impl Into<String>) -> Self {
        let n = name.into();
        Self::with_message(
            ErrorCode::CategoryExists,
            format!("Category '{}' already exists", n),
        )
        .with_detail("name", n)
    }

    /// Create an already exists error
    pub fn already_exists(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::AlreadyExists, format!("{} already exists", r))
            .with_detail("resource", r)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageError, msg)
    }

    /// Create a storage parse error
    pub fn storage_parse(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageParse, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
