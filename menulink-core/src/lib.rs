//! Menulink core — multi-tenant menu resolution, cart aggregation, and
//! order submission.
//!
//! Given a public slug, locate the tenant's menu, let a customer accumulate
//! line items into a cart, and commit that cart as a durable order with an
//! assigned queue number. Presentation layers (dashboard, setup wizard,
//! public ordering page) are collaborators that read and write the entities
//! this crate defines; they carry no state of their own.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod orders;
pub mod store;

pub use auth::{AuthProvider, StaticAuth, UserIdentity};
pub use cart::{Cart, CartLine};
pub use catalog::MenuCatalog;
pub use config::Config;
pub use directory::TenantDirectory;
pub use orders::OrdersManager;
pub use store::{KvStore, RedbStore, StoreError, StoreResult};
