//! Command handler traits and the internal settlement error taxonomy
//!
//! Each state transition is a [`CommandHandler`] executed inside a single
//! write transaction through a [`CommandContext`]. Handlers validate, then
//! mutate; the manager commits after a handler returns Ok, so a failure
//! anywhere aborts the whole operation.

use async_trait::async_trait;
use redb::WriteTransaction;
use shared::{
    Currency, InvoiceItemRecord, Money, MoneyError, OrderRecord, PaymentRecord, Role, TopUpRecord,
};
use thiserror::Error;

use super::storage::SettlementStorage;

/// Settlement errors raised by command handlers
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    #[error("Invalid quantity {count} for product {product_id}")]
    InvalidQuantity { product_id: u64, count: u32 },

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Order not found: {0}")]
    OrderNotFound(u64),

    #[error("Order is not payable: {0}")]
    OrderNotPayable(u64),

    #[error("Order is not rejectable: {0}")]
    OrderNotRejectable(u64),

    #[error("Insufficient funds: balance {balance}, required {required}")]
    InsufficientFunds { balance: Money, required: Money },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<super::storage::StorageError> for SettlementError {
    fn from(err: super::storage::StorageError) -> Self {
        SettlementError::Storage(err.to_string())
    }
}

impl From<MoneyError> for SettlementError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::CurrencyMismatch { left, right } => {
                SettlementError::CurrencyMismatch { left, right }
            }
            MoneyError::UnknownCurrency(_) => SettlementError::InvalidAmount,
        }
    }
}

/// Who is executing the command, and when
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub actor_id: u64,
    pub role: Role,
    /// UTC millis, stamped once per operation
    pub timestamp: i64,
}

/// Transactional view handed to command handlers
///
/// Wraps the write transaction so every read a handler performs (order
/// lookup, balance check) sees its own uncommitted writes and is isolated
/// from concurrent operations.
pub struct CommandContext<'a> {
    txn: &'a WriteTransaction,
    storage: &'a SettlementStorage,
}

impl<'a> CommandContext<'a> {
    pub fn new(txn: &'a WriteTransaction, storage: &'a SettlementStorage) -> Self {
        Self { txn, storage }
    }

    /// Load an order, failing with `OrderNotFound` when absent
    pub fn load_order(&self, order_id: u64) -> Result<OrderRecord, SettlementError> {
        self.storage
            .get_order_txn(self.txn, order_id)?
            .ok_or(SettlementError::OrderNotFound(order_id))
    }

    pub fn save_order(&mut self, order: &OrderRecord) -> Result<(), SettlementError> {
        Ok(self.storage.store_order(self.txn, order)?)
    }

    pub fn save_payment(&mut self, payment: &PaymentRecord) -> Result<(), SettlementError> {
        Ok(self.storage.store_payment(self.txn, payment)?)
    }

    pub fn save_topup(&mut self, topup: &TopUpRecord) -> Result<(), SettlementError> {
        Ok(self.storage.store_topup(self.txn, topup)?)
    }

    pub fn save_invoice_item(&mut self, item: &InvoiceItemRecord) -> Result<(), SettlementError> {
        Ok(self.storage.store_invoice_item(self.txn, item)?)
    }

    pub fn next_order_id(&mut self) -> Result<u64, SettlementError> {
        Ok(self.storage.next_order_id(self.txn)?)
    }

    pub fn next_payment_id(&mut self) -> Result<u64, SettlementError> {
        Ok(self.storage.next_payment_id(self.txn)?)
    }

    pub fn next_topup_id(&mut self) -> Result<u64, SettlementError> {
        Ok(self.storage.next_topup_id(self.txn)?)
    }

    pub fn next_invoice_item_id(&mut self) -> Result<u64, SettlementError> {
        Ok(self.storage.next_invoice_item_id(self.txn)?)
    }

    /// Balance as seen by this transaction, including its own writes
    pub fn balance(&self, client_id: u64, currency: Currency) -> Result<Money, SettlementError> {
        Ok(self.storage.balance_txn(self.txn, client_id, currency)?)
    }

    /// Ids of orders currently in NEW status
    pub fn open_order_ids(&self) -> Result<Vec<u64>, SettlementError> {
        Ok(self.storage.open_order_ids_txn(self.txn)?)
    }
}

/// A settlement state transition
#[async_trait]
pub trait CommandHandler {
    type Output;

    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Self::Output, SettlementError>;
}
