//! Restaurant Model

use super::default_true;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Restaurant entity (one tenant)
///
/// Created once during setup; the slug is immutable thereafter and uniquely
/// identifies the tenant among all persisted restaurants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    /// Owning user (the restaurant is owned exclusively by its creator)
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    /// URL-safe public identifier, derived from the name plus a uniqueness suffix
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Accepted payment-method tags, e.g. "stripe", "counter", "cash" (non-empty)
    #[serde(default)]
    pub payment_methods: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create restaurant payload (setup flow)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub payment_methods: Vec<String>,
}
