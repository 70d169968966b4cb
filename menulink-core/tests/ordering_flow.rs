//! End-to-end flow against a real store file: restaurant setup, menu
//! management, public resolution, cart, submission, and queue advancement.

use menulink_core::auth::{AuthProvider, StaticAuth};
use menulink_core::cart::Cart;
use menulink_core::catalog::MenuCatalog;
use menulink_core::directory::TenantDirectory;
use menulink_core::orders::OrdersManager;
use menulink_core::store::RedbStore;
use shared::ErrorCode;
use shared::models::{CategoryCreate, ItemCreate, OrderStatus, OrderType, RestaurantCreate};

fn open_store(dir: &tempfile::TempDir) -> RedbStore {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    RedbStore::open(dir.path().join("menulink.redb")).expect("open store")
}

#[test]
fn test_full_ordering_flow() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = open_store(&tmp);
    let directory = TenantDirectory::new(store.clone());
    let catalog = MenuCatalog::new(store.clone());
    let orders = OrdersManager::new(store);

    // Operator signs in and sets up their restaurant
    let auth = StaticAuth::signed_in("user_1");
    let user = auth.current_user().expect("signed in");
    let restaurant = directory
        .create_restaurant(
            &user,
            RestaurantCreate {
                name: "Mario's Pizza".into(),
                description: "Authentic wood-fired pizza".into(),
                payment_methods: vec!["counter".into(), "cash".into()],
                ..Default::default()
            },
        )
        .expect("create restaurant");

    // Starter menu plus one custom item
    catalog.seed_defaults(&restaurant.id).expect("seed menu");
    catalog
        .add_category(
            &restaurant.id,
            CategoryCreate {
                name: "Drinks".into(),
                ..Default::default()
            },
        )
        .expect("add category");
    catalog
        .add_item(
            &restaurant.id,
            ItemCreate {
                name: "Limonata".into(),
                price: "3.50".into(),
                category: "Drinks".into(),
                ..Default::default()
            },
        )
        .expect("add item");

    // Customer lands on the public page via the slug
    let resolved = directory.resolve(&restaurant.slug).expect("resolve slug");
    assert_eq!(resolved.id, restaurant.id);

    let items = catalog.list_items(&resolved.id).expect("list items");
    assert_eq!(items.len(), 3);
    let groups = catalog
        .group_by_category(&resolved.id, &items)
        .expect("group menu");
    let group_names: Vec<&str> = groups.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(group_names, vec!["Pizza", "Salads", "Drinks"]);

    // Cart: two pizzas and a drink
    let margherita = items
        .iter()
        .find(|i| i.name == "Margherita Pizza")
        .expect("seeded pizza");
    let limonata = items.iter().find(|i| i.name == "Limonata").expect("drink");

    let mut cart = Cart::new();
    cart.add(margherita);
    cart.add(margherita);
    cart.add(limonata);
    assert_eq!(cart.count(), 3);
    assert_eq!(cart.total(), "41.48".parse().unwrap());

    // Submit and clear
    let order = orders
        .submit(&cart, &resolved, OrderType::Takeaway)
        .expect("submit order");
    cart.clear();
    assert_eq!(order.queue_number, 1);
    assert_eq!(order.total, "41.48".parse().unwrap());
    assert_eq!(order.status, OrderStatus::Pending);

    // Second customer gets the next queue number
    let mut second_cart = Cart::new();
    second_cart.add(limonata);
    let second = orders
        .submit(&second_cart, &resolved, OrderType::DineIn)
        .expect("second order");
    assert_eq!(second.queue_number, 2);

    // Kitchen works the queue: pending → preparing → ready, then stop
    let preparing = orders.advance(&resolved.id, &order.id).expect("advance");
    assert_eq!(preparing.status, OrderStatus::Preparing);
    let ready = orders.advance(&resolved.id, &order.id).expect("advance");
    assert_eq!(ready.status, OrderStatus::Ready);
    let still_ready = orders.advance(&resolved.id, &order.id).expect("no-op");
    assert_eq!(still_ready.status, OrderStatus::Ready);

    let listed = orders.list_orders(&resolved.id).expect("list orders");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].status, OrderStatus::Ready);
    assert_eq!(listed[1].status, OrderStatus::Pending);
}

#[test]
fn test_store_survives_reopen() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let slug;
    {
        let store = open_store(&tmp);
        let directory = TenantDirectory::new(store);
        let restaurant = directory
            .create_restaurant(
                &StaticAuth::signed_in("user_1").current_user().unwrap(),
                RestaurantCreate {
                    name: "Trattoria".into(),
                    payment_methods: vec!["cash".into()],
                    ..Default::default()
                },
            )
            .expect("create restaurant");
        slug = restaurant.slug;
    }

    // Fresh handle over the same file
    let store = open_store(&tmp);
    let directory = TenantDirectory::new(store);
    let resolved = directory.resolve(&slug).expect("resolve after reopen");
    assert_eq!(resolved.name, "Trattoria");
}

#[test]
fn test_empty_cart_never_reaches_the_log() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = open_store(&tmp);
    let directory = TenantDirectory::new(store.clone());
    let orders = OrdersManager::new(store);

    let restaurant = directory
        .create_restaurant(
            &StaticAuth::signed_in("user_1").current_user().unwrap(),
            RestaurantCreate {
                name: "Empty Plates".into(),
                payment_methods: vec!["counter".into()],
                ..Default::default()
            },
        )
        .expect("create restaurant");

    let err = orders
        .submit(&Cart::new(), &restaurant, OrderType::DineIn)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyCart);
    assert!(orders.list_orders(&restaurant.id).unwrap().is_empty());
}
