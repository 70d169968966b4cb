//! redb-based durable store for tenant, menu, and order records
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `records` | string key | JSON bytes | Interop keyspace (`restaurant_<userId>`, `restaurantData`, `menu-<restaurantId>`, `categories-<restaurantId>`) |
//! | `slug_index` | slug | record key | Slug → restaurant record, uniqueness enforced at write time |
//! | `orders` | `(restaurant_id, seq)` | Order JSON | Per-tenant append-only order log |
//! | `counters` | counter key | `u64` | Per-tenant queue number and log sequence |
//!
//! # Durability
//!
//! redb commits are persistent as soon as `commit()` returns (copy-on-write
//! with atomic pointer swap), so every operation here is atomic on the
//! device even across power loss. There is no cross-device coordination;
//! one store file serves one device.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::Order;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// General record table: string key → JSON bytes
const RECORDS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("records");

/// Slug index: public slug → record key of the owning restaurant
const SLUG_INDEX_TABLE: TableDefinition<&str, &str> = TableDefinition::new("slug_index");

/// Order log: key = (restaurant_id, sequence), value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("orders");

/// Monotonic counters: key = "queue_<rid>" or "order_seq_<rid>", value = u64
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

/// Primary ("current") restaurant slot checked before any scan
pub const PRIMARY_RESTAURANT_KEY: &str = "restaurantData";

/// Prefix of per-user restaurant records
pub const RESTAURANT_KEY_PREFIX: &str = "restaurant_";

/// Record key for a user's restaurant
pub fn restaurant_key(user_id: &str) -> String {
    format!("{}{}", RESTAURANT_KEY_PREFIX, user_id)
}

/// Canonical menu record key
pub fn menu_key(restaurant_id: &str) -> String {
    format!("menu-{}", restaurant_id)
}

/// Menu key written by older records
pub fn legacy_menu_key(restaurant_id: &str) -> String {
    format!("menu_{}", restaurant_id)
}

/// Category record key
pub fn categories_key(restaurant_id: &str) -> String {
    format!("categories-{}", restaurant_id)
}

fn queue_counter_key(restaurant_id: &str) -> String {
    format!("queue_{}", restaurant_id)
}

fn order_seq_key(restaurant_id: &str) -> String {
    format!("order_seq_{}", restaurant_id)
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for shared::AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Serialization(e) => shared::AppError::storage_parse(e.to_string()),
            other => shared::AppError::storage(other.to_string()),
        }
    }
}

/// Durable, synchronous, string-keyed storage of serialized records
///
/// The leaf capability every other component builds on. Implementations
/// must make each call atomic on its own.
pub trait KvStore {
    fn get_raw(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
    fn put_raw(&self, key: &str, value: &[u8]) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
    /// All records whose key starts with `prefix`, in key order
    fn scan_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, Vec<u8>)>>;

    /// Deserialize the JSON record at `key`, if present
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` as JSON and store it at `key`
    fn put_json<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.put_raw(key, &bytes)
    }
}

/// Store backed by redb
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (unit tests)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(RECORDS_TABLE)?;
            let _ = write_txn.open_table(SLUG_INDEX_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(COUNTERS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction spanning several operations
    pub fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Record Operations (within transaction) ==========

    pub fn put_raw_txn(&self, txn: &WriteTransaction, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut table = txn.open_table(RECORDS_TABLE)?;
        table.insert(key, value)?;
        Ok(())
    }

    pub fn put_json_txn<T: Serialize>(
        &self,
        txn: &WriteTransaction,
        key: &str,
        value: &T,
    ) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.put_raw_txn(txn, key, &bytes)
    }

    // ========== Slug Index ==========

    /// Record key the slug points to, if any
    pub fn lookup_slug(&self, slug: &str) -> StoreResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SLUG_INDEX_TABLE)?;
        Ok(table.get(slug)?.map(|guard| guard.value().to_string()))
    }

    /// Claim `slug` for `record_key` (within transaction)
    ///
    /// Returns false without writing when the slug is already claimed by a
    /// different record. This is what makes slug uniqueness enforceable at
    /// write time instead of at scan time.
    pub fn claim_slug_txn(
        &self,
        txn: &WriteTransaction,
        slug: &str,
        record_key: &str,
    ) -> StoreResult<bool> {
        let mut table = txn.open_table(SLUG_INDEX_TABLE)?;
        let taken_by_other = match table.get(slug)? {
            Some(existing) => existing.value() != record_key,
            None => false,
        };
        if taken_by_other {
            return Ok(false);
        }
        table.insert(slug, record_key)?;
        Ok(true)
    }

    // ========== Counters ==========

    /// Increment and return a named monotonic counter (within transaction)
    pub fn next_counter_txn(&self, txn: &WriteTransaction, key: &str) -> StoreResult<u64> {
        let mut table = txn.open_table(COUNTERS_TABLE)?;
        let current = table.get(key)?.map(|guard| guard.value()).unwrap_or(0);
        let next = current + 1;
        table.insert(key, next)?;
        Ok(next)
    }

    /// Next queue number for a tenant (monotonic, starts at 1)
    pub fn next_queue_number_txn(
        &self,
        txn: &WriteTransaction,
        restaurant_id: &str,
    ) -> StoreResult<u64> {
        self.next_counter_txn(txn, &queue_counter_key(restaurant_id))
    }

    /// Next order log sequence for a tenant
    pub fn next_order_seq_txn(
        &self,
        txn: &WriteTransaction,
        restaurant_id: &str,
    ) -> StoreResult<u64> {
        self.next_counter_txn(txn, &order_seq_key(restaurant_id))
    }

    // ========== Order Log ==========

    /// Append or rewrite one order log record (within transaction)
    pub fn put_order_txn(
        &self,
        txn: &WriteTransaction,
        restaurant_id: &str,
        seq: u64,
        order: &Order,
    ) -> StoreResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert((restaurant_id, seq), value.as_slice())?;
        Ok(())
    }

    /// All orders for a tenant in log (submission) order
    ///
    /// Malformed log records are skipped with a warning rather than failing
    /// the whole listing.
    pub fn orders_for_restaurant(&self, restaurant_id: &str) -> StoreResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        let range_start = (restaurant_id, 0u64);
        let range_end = (restaurant_id, u64::MAX);
        for result in table.range(range_start..=range_end)? {
            let (key, value) = result?;
            match serde_json::from_slice::<Order>(value.value()) {
                Ok(order) => orders.push(order),
                Err(err) => {
                    tracing::warn!(
                        restaurant_id,
                        seq = key.value().1,
                        %err,
                        "skipping malformed order record"
                    );
                }
            }
        }
        Ok(orders)
    }

    /// Locate an order by id within a tenant's log
    pub fn find_order(
        &self,
        restaurant_id: &str,
        order_id: &str,
    ) -> StoreResult<Option<(u64, Order)>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let range_start = (restaurant_id, 0u64);
        let range_end = (restaurant_id, u64::MAX);
        for result in table.range(range_start..=range_end)? {
            let (key, value) = result?;
            let Ok(order) = serde_json::from_slice::<Order>(value.value()) else {
                continue;
            };
            if order.id == order_id {
                return Ok(Some((key.value().1, order)));
            }
        }
        Ok(None)
    }
}

impl KvStore for RedbStore {
    fn get_raw(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn put_raw(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(RECORDS_TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(RECORDS_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;

        let mut out = Vec::new();
        for result in table.range(prefix..)? {
            let (key, value) = result?;
            let key = key.value();
            if !key.starts_with(prefix) {
                break;
            }
            out.push((key.to_string(), value.value().to_vec()));
        }
        Ok(out)
    }
}
