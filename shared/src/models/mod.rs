//! Domain models
//!
//! All entities serialize with camelCase field names to stay byte-compatible
//! with the persisted record format consumed by the presentation layer.

pub mod category;
pub mod menu_item;
pub mod order;
pub mod restaurant;

pub use category::{CategoryCreate, MenuCategory};
pub use menu_item::{ItemCreate, ItemUpdate, MenuItem};
pub use order::{Order, OrderLine, OrderStatus, OrderType};
pub use restaurant::{Restaurant, RestaurantCreate};

use serde::Deserialize;

/// One element of a persisted collection, kept even when it fails to parse.
///
/// Persisted arrays are deserialized element-wise through this sum type so a
/// single malformed entry degrades to a visible [`Record::Malformed`] branch
/// instead of rejecting the whole collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Record<T> {
    Valid(T),
    Malformed(serde_json::Value),
}

impl<T> Record<T> {
    /// The valid payload, if this record parsed cleanly
    pub fn valid(self) -> Option<T> {
        match self {
            Record::Valid(v) => Some(v),
            Record::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Record::Malformed(_))
    }
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_partitions_malformed_elements() {
        let raw = r#"[
            {"id":"item_1","name":"Burger","price":12.99,"category":"Mains"},
            {"id":"item_2","price":"not-a-number","category":"Mains"},
            {"id":"item_3","name":"Salad","price":8.5,"category":"Starters"}
        ]"#;
        let records: Vec<Record<MenuItem>> = serde_json::from_str(raw).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[1].is_malformed());

        let valid: Vec<MenuItem> = records.into_iter().filter_map(Record::valid).collect();
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].name, "Burger");
        assert_eq!(valid[1].name, "Salad");
    }
}
