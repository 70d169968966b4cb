//! Menu Item Model

use super::default_true;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// `category` references a [`super::MenuCategory`] by name for display
/// grouping; items whose category name matches no known category degrade to
/// the literal "Other" bucket at grouping time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub restaurant_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Non-negative, two-decimal precision; missing values degrade to zero
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    /// Some historic records carry this flag as "isAvailable"
    #[serde(default = "default_true", alias = "isAvailable")]
    pub available: bool,
}

/// Create item payload
///
/// `price` arrives as decimal text (form input) and is validated by the
/// catalog before an entity is built.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub available: Option<bool>,
}

/// Update item payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub available: Option<bool>,
}
