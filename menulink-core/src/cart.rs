//! In-memory order cart
//!
//! Per-session, ephemeral, single-tenant. Each line snapshots the menu item
//! as it looked when added; later menu edits do not reach into an open cart.

use rust_decimal::Decimal;
use shared::models::MenuItem;

/// One cart line: an item snapshot plus its quantity (always >= 1)
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal: unit price times quantity
    pub fn amount(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }
}

/// The diner's cart for one restaurant visit
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`
    ///
    /// An existing line for the same item id is incremented; otherwise a new
    /// line is appended. Items without an id cannot be tracked and are
    /// rejected. Returns whether the cart changed.
    pub fn add(&mut self, item: &MenuItem) -> bool {
        if item.id.is_empty() {
            tracing::warn!(name = %item.name, "ignoring cart add for item without id");
            return false;
        }
        match self.lines.iter_mut().find(|l| l.item.id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            }),
        }
        true
    }

    /// Remove one unit of the item with `item_id`
    ///
    /// A line at quantity 1 disappears; an id not in the cart is a no-op.
    pub fn remove(&mut self, item_id: &str) {
        if let Some(pos) = self.lines.iter().position(|l| l.item.id == item_id) {
            if self.lines[pos].quantity > 1 {
                self.lines[pos].quantity -= 1;
            } else {
                self.lines.remove(pos);
            }
        }
    }

    /// Sum of line amounts
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::amount).sum()
    }

    /// Total unit count across all lines
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Quantity of one item, 0 when absent
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.item.id == item_id)
            .map_or(0, |l| l.quantity)
    }

    /// Lines in the order the items were first added
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Lines reordered to follow `menu`; lines for items no longer on the
    /// menu keep their relative order at the end
    pub fn lines_in_menu_order(&self, menu: &[MenuItem]) -> Vec<CartLine> {
        let mut ordered: Vec<CartLine> = Vec::with_capacity(self.lines.len());
        for item in menu {
            if let Some(line) = self.lines.iter().find(|l| l.item.id == item.id) {
                ordered.push(line.clone());
            }
        }
        for line in &self.lines {
            if !menu.iter().any(|item| item.id == line.item.id) {
                ordered.push(line.clone());
            }
        }
        ordered
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, price: &str) -> MenuItem {
        MenuItem {
            id: id.into(),
            restaurant_id: "rest_1".into(),
            name: name.into(),
            description: String::new(),
            price: price.parse().unwrap(),
            category: "Mains".into(),
            available: true,
        }
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::new();
        let burger = item("item_1", "Burger", "10.00");
        assert!(cart.add(&burger));
        assert!(cart.add(&burger));
        assert!(cart.add(&item("item_2", "Fries", "4.50")));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.quantity_of("item_1"), 2);
        assert_eq!(cart.total(), "24.50".parse().unwrap());
    }

    #[test]
    fn test_quantity_never_below_one() {
        let mut cart = Cart::new();
        let burger = item("item_1", "Burger", "10.00");
        cart.add(&burger);
        cart.add(&burger);

        cart.remove("item_1");
        assert_eq!(cart.quantity_of("item_1"), 1);

        // At quantity 1, removal deletes the line entirely
        cart.remove("item_1");
        assert_eq!(cart.quantity_of("item_1"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add(&item("item_1", "Burger", "10.00"));
        cart.remove("item_9");
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_add_rejects_missing_id() {
        let mut cart = Cart::new();
        assert!(!cart.add(&item("", "Ghost", "1.00")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_independent_of_add_order() {
        let a = item("item_1", "A", "10.00");
        let b = item("item_2", "B", "5.00");

        let mut forward = Cart::new();
        forward.add(&a);
        forward.add(&a);
        forward.add(&b);

        let mut backward = Cart::new();
        backward.add(&b);
        backward.add(&a);
        backward.add(&a);

        assert_eq!(forward.total(), backward.total());
        assert_eq!(forward.total(), "25.00".parse().unwrap());
    }

    #[test]
    fn test_lines_in_menu_order() {
        let a = item("item_1", "A", "10.00");
        let b = item("item_2", "B", "5.00");
        let gone = item("item_9", "Removed", "1.00");

        let mut cart = Cart::new();
        cart.add(&gone);
        cart.add(&b);
        cart.add(&a);

        let menu = vec![a.clone(), b.clone()];
        let ordered = cart.lines_in_menu_order(&menu);
        let ids: Vec<&str> = ordered.iter().map(|l| l.item.id.as_str()).collect();
        assert_eq!(ids, vec!["item_1", "item_2", "item_9"]);
    }

    #[test]
    fn test_snapshot_isolated_from_menu_edits() {
        let mut cart = Cart::new();
        let mut burger = item("item_1", "Burger", "10.00");
        cart.add(&burger);

        burger.price = "99.00".parse().unwrap();
        assert_eq!(cart.total(), "10.00".parse().unwrap());
    }
}
