//! Order submission and queue management
//!
//! Submission snapshots the cart into an immutable order record, assigns a
//! per-tenant queue number, and appends to the order log in one transaction.
//! The queue side only ever moves an order forward along
//! pending → preparing → ready.

use crate::cart::Cart;
use crate::store::RedbStore;
use chrono::Utc;
use shared::models::{Order, OrderLine, OrderStatus, OrderType, Restaurant};
use shared::util::prefixed_id;
use shared::{AppError, AppResult};

/// Order pipeline and queue for all tenants
#[derive(Clone)]
pub struct OrdersManager {
    store: RedbStore,
}

impl OrdersManager {
    pub fn new(store: RedbStore) -> Self {
        Self { store }
    }

    /// Submit the cart as a new order
    ///
    /// An empty cart is rejected before anything touches the store. On
    /// success the order is durable with its queue number assigned; the
    /// caller is responsible for clearing the cart afterwards.
    pub fn submit(
        &self,
        cart: &Cart,
        restaurant: &Restaurant,
        order_type: OrderType,
    ) -> AppResult<Order> {
        if cart.is_empty() {
            return Err(AppError::empty_cart());
        }

        let items: Vec<OrderLine> = cart
            .lines()
            .iter()
            .map(|line| OrderLine {
                id: line.item.id.clone(),
                name: line.item.name.clone(),
                price: line.item.price,
                quantity: line.quantity,
            })
            .collect();
        // Total is computed from the snapshot, not taken from the caller
        let total = items.iter().map(OrderLine::amount).sum();

        let txn = self.store.begin_write()?;
        let seq = self.store.next_order_seq_txn(&txn, &restaurant.id)?;
        let queue_number = u32::try_from(self.store.next_queue_number_txn(&txn, &restaurant.id)?)
            .map_err(|_| AppError::internal("queue number counter exceeds u32"))?;

        let order = Order {
            id: prefixed_id("order"),
            restaurant_id: restaurant.id.clone(),
            items,
            total,
            order_type,
            status: OrderStatus::Pending,
            queue_number,
            created_at: Utc::now(),
        };
        self.store.put_order_txn(&txn, &restaurant.id, seq, &order)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(
            order_id = %order.id,
            restaurant_id = %restaurant.id,
            queue_number,
            total = %order.total,
            "order submitted"
        );
        Ok(order)
    }

    /// All orders for a tenant in submission order
    pub fn list_orders(&self, restaurant_id: &str) -> AppResult<Vec<Order>> {
        Ok(self.store.orders_for_restaurant(restaurant_id)?)
    }

    /// Advance an order one step along the queue
    ///
    /// pending → preparing → ready; advancing a ready order is a no-op that
    /// returns the order unchanged.
    pub fn advance(&self, restaurant_id: &str, order_id: &str) -> AppResult<Order> {
        let (seq, mut order) = self
            .store
            .find_order(restaurant_id, order_id)?
            .ok_or_else(|| AppError::order_not_found(order_id))?;

        let Some(next) = order.status.next() else {
            return Ok(order);
        };
        order.status = next;

        let txn = self.store.begin_write()?;
        self.store.put_order_txn(&txn, restaurant_id, seq, &order)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(
            order_id = %order.id,
            restaurant_id,
            status = ?order.status,
            "order advanced"
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;
    use shared::models::MenuItem;

    fn manager() -> OrdersManager {
        OrdersManager::new(RedbStore::open_in_memory().unwrap())
    }

    fn restaurant(id: &str) -> Restaurant {
        Restaurant {
            id: id.into(),
            user_id: "user_1".into(),
            name: "Mario's".into(),
            slug: "marios-1".into(),
            description: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            payment_methods: vec!["counter".into()],
            is_active: true,
            created_at: None,
        }
    }

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
    fn test_submit_snapshots_cart() {
        let manager = manager();
        let rest = restaurant("rest_1");

        let mut cart = Cart::new();
        let a = item("item_a", "A", "10.00");
        cart.add(&a);
        cart.add(&a);
        cart.add(&item("item_b", "B", "5.00"));

        let order = manager.submit(&cart, &rest, OrderType::Takeaway).unwrap();
        assert_eq!(order.total, "25.00".parse().unwrap());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.queue_number, 1);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.order_type, OrderType::Takeaway);

        let listed = manager.list_orders("rest_1").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], order);
    }

    #[test]
    fn test_empty_cart_rejected_without_side_effects() {
        let manager = manager();
        let rest = restaurant("rest_1");

        let err = manager
            .submit(&Cart::new(), &rest, OrderType::DineIn)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert!(manager.list_orders("rest_1").unwrap().is_empty());

        // The rejection must not have consumed a queue number
        let mut cart = Cart::new();
        cart.add(&item("item_a", "A", "10.00"));
        let order = manager.submit(&cart, &rest, OrderType::DineIn).unwrap();
        assert_eq!(order.queue_number, 1);
    }

    #[test]
    fn test_queue_numbers_strictly_increase_per_tenant() {
        let manager = manager();
        let mut cart = Cart::new();
        cart.add(&item("item_a", "A", "10.00"));

        let numbers: Vec<u32> = (0..3)
            .map(|_| {
                manager
                    .submit(&cart, &restaurant("rest_1"), OrderType::DineIn)
                    .unwrap()
                    .queue_number
            })
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        // A second tenant has its own sequence
        let other = manager
            .submit(&cart, &restaurant("rest_2"), OrderType::DineIn)
            .unwrap();
        assert_eq!(other.queue_number, 1);
    }

    #[test]
    fn test_advance_walks_statuses_then_stops() {
        let manager = manager();
        let rest = restaurant("rest_1");
        let mut cart = Cart::new();
        cart.add(&item("item_a", "A", "10.00"));
        let order = manager.submit(&cart, &rest, OrderType::DineIn).unwrap();

        let preparing = manager.advance("rest_1", &order.id).unwrap();
        assert_eq!(preparing.status, OrderStatus::Preparing);
        let ready = manager.advance("rest_1", &order.id).unwrap();
        assert_eq!(ready.status, OrderStatus::Ready);

        // Terminal status: advancing again changes nothing
        let still_ready = manager.advance("rest_1", &order.id).unwrap();
        assert_eq!(still_ready, ready);

        let listed = manager.list_orders("rest_1").unwrap();
        assert_eq!(listed[0].status, OrderStatus::Ready);
    }

    #[test]
    fn test_advance_unknown_order() {
        let manager = manager();
        let err = manager.advance("rest_1", "order_missing").unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }
}
