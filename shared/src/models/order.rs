//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status state machine: `pending → preparing → ready`
///
/// `ready` is terminal; no transition is defined out of it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
}

impl OrderStatus {
    /// The next state an operator advance moves to, if any
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready => None,
        }
    }
}

/// How the customer wants to receive the order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    #[default]
    DineIn,
    Takeaway,
    Delivery,
}

/// One order line: a menu item snapshot captured at submission time
///
/// Independent of later menu edits. Missing price/quantity on historic
/// records are tolerated field-by-field and degrade to zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Menu item id the snapshot was taken from
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub quantity: u32,
}

impl OrderLine {
    /// Line amount: price × quantity
    pub fn amount(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Order entity
///
/// Created at submission; mutated only by status transitions; never deleted.
/// The total is computed once from the line snapshots and never recomputed
/// against the live menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub restaurant_id: String,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub status: OrderStatus,
    /// Tenant-scoped customer-facing queue token
    #[serde(default)]
    pub queue_number: u32,
    pub created_at: DateTime<Utc>,
}
