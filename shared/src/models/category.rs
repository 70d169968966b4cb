//! Menu Category Model

use serde::{Deserialize, Serialize};

/// Menu category entity
///
/// Category names are unique within a restaurant (case-sensitive). Display
/// order is a positive integer; ties are broken by insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub restaurant_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Persisted as "order" in the record format
    #[serde(rename = "order")]
    pub display_order: u32,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to the end of the current display order
    #[serde(default)]
    pub display_order: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order_serialized_as_order() {
        let cat = MenuCategory {
            id: "1".into(),
            restaurant_id: "rest_1".into(),
            name: "Pizza".into(),
            description: Some("Wood-fired pizzas".into()),
            display_order: 1,
        };
        let v = serde_json::to_value(&cat).unwrap();
        assert_eq!(v["order"], 1);
        assert!(v.get("displayOrder").is_none());

        let back: MenuCategory = serde_json::from_value(v).unwrap();
        assert_eq!(back.display_order, 1);
    }

    #[test]
    fn test_parses_reference_format() {
        // Shape written by the reference implementation (no restaurantId)
        let json = r#"{"id":"2","name":"Salads","description":"Fresh salads","order":2}"#;
        let cat: MenuCategory = serde_json::from_str(json).unwrap();
        assert_eq!(cat.name, "Salads");
        assert_eq!(cat.display_order, 2);
        assert!(cat.restaurant_id.is_empty());
    }
}
