//! Menu catalog
//!
//! Categories and items for one tenant. Items reference categories by name;
//! grouping degrades unknown references to a literal "Other" bucket instead
//! of failing. Persisted collections are parsed element-wise so one
//! malformed record never hides the rest of the menu.

use crate::store::{self, KvStore, RedbStore};
use rust_decimal::Decimal;
use shared::models::{CategoryCreate, ItemCreate, ItemUpdate, MenuCategory, MenuItem, Record};
use shared::util::prefixed_id;
use shared::{AppError, AppResult};
use std::str::FromStr;

/// The bucket items land in when their category name matches no known category
pub const OTHER_BUCKET: &str = "Other";

/// Menu catalog for all tenants, backed by the shared store
#[derive(Clone)]
pub struct MenuCatalog {
    store: RedbStore,
}

impl MenuCatalog {
    pub fn new(store: RedbStore) -> Self {
        Self { store }
    }

    // ========== Categories ==========

    /// Categories sorted by display order, ties broken by insertion order
    pub fn list_categories(&self, restaurant_id: &str) -> AppResult<Vec<MenuCategory>> {
        let mut categories = self.load_categories(restaurant_id)?;
        // sort_by_key is stable, so equal display orders keep insertion order
        categories.sort_by_key(|c| c.display_order);
        Ok(categories)
    }

    /// Add a category; the name must be unique (case-sensitive) per tenant
    pub fn add_category(
        &self,
        restaurant_id: &str,
        payload: CategoryCreate,
    ) -> AppResult<MenuCategory> {
        let mut invalid: Vec<&str> = Vec::new();
        if payload.name.trim().is_empty() {
            invalid.push("name");
        }
        if payload.display_order == Some(0) {
            invalid.push("displayOrder");
        }
        if !invalid.is_empty() {
            return Err(AppError::validation_fields(&invalid));
        }

        let mut categories = self.load_categories(restaurant_id)?;
        let name = payload.name.trim().to_string();
        if categories.iter().any(|c| c.name == name) {
            return Err(AppError::category_exists(name));
        }

        let category = MenuCategory {
            id: prefixed_id("cat"),
            restaurant_id: restaurant_id.to_string(),
            name,
            description: payload.description,
            display_order: payload
                .display_order
                .unwrap_or(categories.len() as u32 + 1),
        };
        categories.push(category.clone());
        self.save_categories(restaurant_id, &categories)?;
        Ok(category)
    }

    // ========== Items ==========

    /// Items in insertion order; malformed persisted entries are skipped
    pub fn list_items(&self, restaurant_id: &str) -> AppResult<Vec<MenuItem>> {
        self.load_items(restaurant_id)
    }

    /// Group items by category name
    ///
    /// Groups follow the catalog's category display order and each group
    /// preserves item insertion order. Items whose category matches no known
    /// category are collected under a trailing "Other" bucket. Categories
    /// without items are omitted, matching the rendered menu.
    pub fn group_by_category(
        &self,
        restaurant_id: &str,
        items: &[MenuItem],
    ) -> AppResult<Vec<(String, Vec<MenuItem>)>> {
        let categories = self.list_categories(restaurant_id)?;

        let mut groups: Vec<(String, Vec<MenuItem>)> = categories
            .iter()
            .map(|c| (c.name.clone(), Vec::new()))
            .collect();
        let mut other: Vec<MenuItem> = Vec::new();

        for item in items {
            match groups.iter_mut().find(|(name, _)| *name == item.category) {
                Some((_, bucket)) => bucket.push(item.clone()),
                None => other.push(item.clone()),
            }
        }

        groups.retain(|(_, bucket)| !bucket.is_empty());
        if !other.is_empty() {
            groups.push((OTHER_BUCKET.to_string(), other));
        }
        Ok(groups)
    }

    /// Add a menu item
    pub fn add_item(&self, restaurant_id: &str, payload: ItemCreate) -> AppResult<MenuItem> {
        let mut invalid: Vec<&str> = Vec::new();
        if payload.name.trim().is_empty() {
            invalid.push("name");
        }
        let price = match parse_price(&payload.price) {
            Some(price) => price,
            None => {
                invalid.push("price");
                Decimal::ZERO
            }
        };
        if payload.category.trim().is_empty() {
            invalid.push("category");
        }
        if !invalid.is_empty() {
            return Err(AppError::validation_fields(&invalid));
        }

        let item = MenuItem {
            id: prefixed_id("item"),
            restaurant_id: restaurant_id.to_string(),
            name: payload.name.trim().to_string(),
            description: payload.description,
            price,
            category: payload.category.trim().to_string(),
            available: payload.available.unwrap_or(true),
        };

        let mut items = self.load_items(restaurant_id)?;
        items.push(item.clone());
        self.save_items(restaurant_id, &items)?;
        Ok(item)
    }

    /// Update a menu item in place
    pub fn update_item(
        &self,
        restaurant_id: &str,
        item_id: &str,
        payload: ItemUpdate,
    ) -> AppResult<MenuItem> {
        let mut invalid: Vec<&str> = Vec::new();
        if let Some(ref name) = payload.name
            && name.trim().is_empty()
        {
            invalid.push("name");
        }
        let price = match payload.price {
            Some(ref text) => match parse_price(text) {
                Some(price) => Some(price),
                None => {
                    invalid.push("price");
                    None
                }
            },
            None => None,
        };
        if let Some(ref category) = payload.category
            && category.trim().is_empty()
        {
            invalid.push("category");
        }
        if !invalid.is_empty() {
            return Err(AppError::validation_fields(&invalid));
        }

        let mut items = self.load_items(restaurant_id)?;
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::item_not_found(item_id))?;

        if let Some(name) = payload.name {
            item.name = name.trim().to_string();
        }
        if let Some(description) = payload.description {
            item.description = description;
        }
        if let Some(price) = price {
            item.price = price;
        }
        if let Some(category) = payload.category {
            item.category = category.trim().to_string();
        }
        if let Some(available) = payload.available {
            item.available = available;
        }
        let updated = item.clone();
        self.save_items(restaurant_id, &items)?;
        Ok(updated)
    }

    /// Remove a menu item
    pub fn delete_item(&self, restaurant_id: &str, item_id: &str) -> AppResult<()> {
        let mut items = self.load_items(restaurant_id)?;
        let before = items.len();
        items.retain(|i| i.id != item_id);
        if items.len() == before {
            return Err(AppError::item_not_found(item_id));
        }
        self.save_items(restaurant_id, &items)?;
        Ok(())
    }

    /// Set an item's availability flag
    ///
    /// Idempotent; no side effects beyond the stored flag.
    pub fn set_availability(
        &self,
        restaurant_id: &str,
        item_id: &str,
        available: bool,
    ) -> AppResult<MenuItem> {
        let mut items = self.load_items(restaurant_id)?;
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::item_not_found(item_id))?;
        item.available = available;
        let updated = item.clone();
        self.save_items(restaurant_id, &items)?;
        Ok(updated)
    }

    /// Install the starter dataset for a tenant with no menu yet
    ///
    /// Writes only the collections whose keys are absent; an existing (even
    /// empty) collection is left alone.
    pub fn seed_defaults(&self, restaurant_id: &str) -> AppResult<()> {
        if self
            .store
            .get_raw(&store::categories_key(restaurant_id))?
            .is_none()
        {
            let categories: Vec<MenuCategory> = [
                ("Pizza", "Wood-fired pizzas"),
                ("Salads", "Fresh salads"),
                ("Pasta", "Italian pasta dishes"),
                ("Desserts", "Sweet treats"),
            ]
            .iter()
            .enumerate()
            .map(|(i, (name, description))| MenuCategory {
                id: prefixed_id("cat"),
                restaurant_id: restaurant_id.to_string(),
                name: (*name).to_string(),
                description: Some((*description).to_string()),
                display_order: i as u32 + 1,
            })
            .collect();
            self.save_categories(restaurant_id, &categories)?;
        }

        if self
            .store
            .get_raw(&store::menu_key(restaurant_id))?
            .is_none()
            && self
                .store
                .get_raw(&store::legacy_menu_key(restaurant_id))?
                .is_none()
        {
            let items = vec![
                MenuItem {
                    id: prefixed_id("item"),
                    restaurant_id: restaurant_id.to_string(),
                    name: "Margherita Pizza".into(),
                    description: "Fresh tomatoes, mozzarella, basil, olive oil".into(),
                    price: Decimal::new(1899, 2),
                    category: "Pizza".into(),
                    available: true,
                },
                MenuItem {
                    id: prefixed_id("item"),
                    restaurant_id: restaurant_id.to_string(),
                    name: "Caesar Salad".into(),
                    description: "Romaine lettuce, parmesan, croutons, caesar dressing".into(),
                    price: Decimal::new(1499, 2),
                    category: "Salads".into(),
                    available: true,
                },
            ];
            self.save_items(restaurant_id, &items)?;
        }

        Ok(())
    }

    // ========== Persistence ==========

    fn load_items(&self, restaurant_id: &str) -> AppResult<Vec<MenuItem>> {
        let bytes = match self.store.get_raw(&store::menu_key(restaurant_id))? {
            Some(bytes) => Some(bytes),
            None => self.store.get_raw(&store::legacy_menu_key(restaurant_id))?,
        };
        Ok(self.parse_collection(restaurant_id, "menu", bytes))
    }

    fn save_items(&self, restaurant_id: &str, items: &[MenuItem]) -> AppResult<()> {
        Ok(self
            .store
            .put_json(&store::menu_key(restaurant_id), &items)?)
    }

    fn load_categories(&self, restaurant_id: &str) -> AppResult<Vec<MenuCategory>> {
        let bytes = self.store.get_raw(&store::categories_key(restaurant_id))?;
        Ok(self.parse_collection(restaurant_id, "categories", bytes))
    }

    fn save_categories(
        &self,
        restaurant_id: &str,
        categories: &[MenuCategory],
    ) -> AppResult<()> {
        Ok(self
            .store
            .put_json(&store::categories_key(restaurant_id), &categories)?)
    }

    /// Parse a persisted collection, degrading failures instead of erroring:
    /// an unreadable value becomes an empty collection, a malformed element
    /// is dropped. Both paths warn.
    fn parse_collection<T: serde::de::DeserializeOwned>(
        &self,
        restaurant_id: &str,
        collection: &str,
        bytes: Option<Vec<u8>>,
    ) -> Vec<T> {
        let Some(bytes) = bytes else {
            return Vec::new();
        };
        let records: Vec<Record<T>> = match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    restaurant_id,
                    collection,
                    %err,
                    "unreadable collection, falling back to empty"
                );
                return Vec::new();
            }
        };
        let total = records.len();
        let valid: Vec<T> = records.into_iter().filter_map(Record::valid).collect();
        if valid.len() < total {
            tracing::warn!(
                restaurant_id,
                collection,
                dropped = total - valid.len(),
                "dropped malformed collection elements"
            );
        }
        valid
    }
}

fn parse_price(text: &str) -> Option<Decimal> {
    let price = Decimal::from_str(text.trim()).ok()?;
    if price.is_sign_negative() {
        return None;
    }
    Some(price.round_dp(2))
}
