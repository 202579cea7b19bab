//! redb-based storage layer for the settlement core
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `OrderRecord` | Orders with owned items |
//! | `open_orders` | `order_id` | `()` | Index of orders in NEW status |
//! | `payments` | `payment_id` | `PaymentRecord` | Payment ledger (append-only) |
//! | `topups` | `topup_id` | `TopUpRecord` | Top-up ledger (append-only) |
//! | `invoice_items` | `item_id` | `InvoiceItemRecord` | Stock-in entries |
//! | `counters` | name | `u64` | Id allocation |
//!
//! # Atomicity
//!
//! Every settlement operation runs inside a single `WriteTransaction`; redb
//! commits are all-or-nothing, so no partially-applied order or payment is
//! ever observable. redb admits one writer at a time, which also makes the
//! balance-check-then-pay sequence in `pay_order` race-free.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::{Currency, InvoiceItemRecord, Money, OrderRecord, PaymentRecord, TopUpRecord};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::inventory;
use super::ledger;

/// Orders: key = order_id, value = JSON-serialized OrderRecord
const ORDERS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("orders");

/// Index of orders in NEW status: key = order_id, value = empty
const OPEN_ORDERS_TABLE: TableDefinition<u64, ()> = TableDefinition::new("open_orders");

/// Payments: key = payment_id, value = JSON-serialized PaymentRecord
const PAYMENTS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("payments");

/// Top-ups: key = topup_id, value = JSON-serialized TopUpRecord
const TOPUPS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("topups");

/// Stock-in entries: key = item_id, value = JSON-serialized InvoiceItemRecord
const INVOICE_ITEMS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("invoice_items");

/// Id counters: key = counter name, value = last issued id
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

const ORDER_COUNTER: &str = "order";
const PAYMENT_COUNTER: &str = "payment";
const TOPUP_COUNTER: &str = "topup";
const INVOICE_ITEM_COUNTER: &str = "invoice_item";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
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

    #[error("Order not found: {0}")]
    OrderNotFound(u64),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Settlement storage backed by redb
#[derive(Clone)]
pub struct SettlementStorage {
    db: Arc<Database>,
}

impl SettlementStorage {
    /// Open or create the database at the given path
    ///
    /// redb uses `Durability::Immediate` by default: commits are persistent
    /// as soon as `commit()` returns and the file is always in a consistent
    /// state, even across power loss.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Create all tables so later read transactions never miss one
    fn init_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(OPEN_ORDERS_TABLE)?;
            let _ = write_txn.open_table(PAYMENTS_TABLE)?;
            let _ = write_txn.open_table(TOPUPS_TABLE)?;
            let _ = write_txn.open_table(INVOICE_ITEMS_TABLE)?;
            let _ = write_txn.open_table(COUNTERS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Id Allocation ==========

    fn next_id(&self, txn: &WriteTransaction, counter: &str) -> StorageResult<u64> {
        let mut table = txn.open_table(COUNTERS_TABLE)?;
        let next = table.get(counter)?.map(|g| g.value()).unwrap_or(0) + 1;
        table.insert(counter, next)?;
        Ok(next)
    }

    pub fn next_order_id(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        self.next_id(txn, ORDER_COUNTER)
    }

    pub fn next_payment_id(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        self.next_id(txn, PAYMENT_COUNTER)
    }

    pub fn next_topup_id(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        self.next_id(txn, TOPUP_COUNTER)
    }

    pub fn next_invoice_item_id(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        self.next_id(txn, INVOICE_ITEM_COUNTER)
    }

    // ========== Order Operations ==========

    /// Store an order and keep the open-order index in step with its status
    pub fn store_order(&self, txn: &WriteTransaction, order: &OrderRecord) -> StorageResult<()> {
        let value = serde_json::to_vec(order)?;
        {
            let mut table = txn.open_table(ORDERS_TABLE)?;
            table.insert(order.id, value.as_slice())?;
        }
        let mut index = txn.open_table(OPEN_ORDERS_TABLE)?;
        if order.status.is_terminal() {
            index.remove(order.id)?;
        } else {
            index.insert(order.id, ())?;
        }
        Ok(())
    }

    /// Get an order by id (read-only)
    pub fn get_order(&self, order_id: u64) -> StorageResult<Option<OrderRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Get an order by id within a write transaction
    pub fn get_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: u64,
    ) -> StorageResult<Option<OrderRecord>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Ids of orders currently in NEW status (within a write transaction)
    pub fn open_order_ids_txn(&self, txn: &WriteTransaction) -> StorageResult<Vec<u64>> {
        let index = txn.open_table(OPEN_ORDERS_TABLE)?;
        let mut ids = Vec::new();
        for row in index.iter()? {
            let (key, _) = row?;
            ids.push(key.value());
        }
        Ok(ids)
    }

    /// All orders for a client, newest first
    pub fn orders_for_client(&self, client_id: u64) -> StorageResult<Vec<OrderRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        let mut orders = Vec::new();
        for row in table.iter()? {
            let (_, value) = row?;
            let order: OrderRecord = serde_json::from_slice(value.value())?;
            if order.client_id == client_id {
                orders.push(order);
            }
        }
        orders.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(orders)
    }

    // ========== Ledger Operations ==========

    pub fn store_payment(
        &self,
        txn: &WriteTransaction,
        payment: &PaymentRecord,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(PAYMENTS_TABLE)?;
        let value = serde_json::to_vec(payment)?;
        table.insert(payment.id, value.as_slice())?;
        Ok(())
    }

    pub fn store_topup(&self, txn: &WriteTransaction, topup: &TopUpRecord) -> StorageResult<()> {
        let mut table = txn.open_table(TOPUPS_TABLE)?;
        let value = serde_json::to_vec(topup)?;
        table.insert(topup.id, value.as_slice())?;
        Ok(())
    }

    /// All payments for a client, newest first
    pub fn payments_for_client(&self, client_id: u64) -> StorageResult<Vec<PaymentRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PAYMENTS_TABLE)?;
        let mut payments = Vec::new();
        for row in table.iter()? {
            let (_, value) = row?;
            let payment: PaymentRecord = serde_json::from_slice(value.value())?;
            if payment.client_id == client_id {
                payments.push(payment);
            }
        }
        payments.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(payments)
    }

    /// Spendable balance for a client in the given currency (read-only)
    ///
    /// Reads from a redb snapshot: a balance read concurrent with a payment
    /// commit observes either the pre- or post-commit ledger, never a
    /// partially-applied one.
    pub fn balance(&self, client_id: u64, currency: Currency) -> StorageResult<Money> {
        let read_txn = self.db.begin_read()?;
        let topups = read_txn.open_table(TOPUPS_TABLE)?;
        let payments = read_txn.open_table(PAYMENTS_TABLE)?;
        ledger::balance_from_tables(&topups, &payments, client_id, currency)
    }

    /// Spendable balance within a write transaction (the pay-order path)
    pub fn balance_txn(
        &self,
        txn: &WriteTransaction,
        client_id: u64,
        currency: Currency,
    ) -> StorageResult<Money> {
        let topups = txn.open_table(TOPUPS_TABLE)?;
        let payments = txn.open_table(PAYMENTS_TABLE)?;
        ledger::balance_from_tables(&topups, &payments, client_id, currency)
    }

    // ========== Inventory Operations ==========

    pub fn store_invoice_item(
        &self,
        txn: &WriteTransaction,
        item: &InvoiceItemRecord,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(INVOICE_ITEMS_TABLE)?;
        let value = serde_json::to_vec(item)?;
        table.insert(item.id, value.as_slice())?;
        Ok(())
    }

    /// Sellable quantity for a product: stock-in minus NEW/PAID reservations,
    /// floored at zero
    pub fn available_quantity(&self, product_id: u64) -> StorageResult<u32> {
        let read_txn = self.db.begin_read()?;
        let invoice_items = read_txn.open_table(INVOICE_ITEMS_TABLE)?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;
        inventory::available_from_tables(&invoice_items, &orders, product_id)
    }
}
