//! SettlementManager - transactional entry point for every settlement operation
//!
//! # Operation Flow
//!
//! ```text
//! operation (create_order / pay_order / ...)
//!     ├─ 1. Resolve catalog data (products, actual price action)
//!     ├─ 2. Begin write transaction
//!     ├─ 3. Create CommandContext
//!     ├─ 4. Execute the action (validate, mutate)
//!     ├─ 5. Commit on Ok, abort on Err
//!     └─ 6. Return the typed output
//! ```
//!
//! redb admits one write transaction at a time, so every operation observes
//! a settled ledger and its writes land atomically.

mod error;
pub use error::*;

use super::actions::{
    CreateOrderAction, PayOrderAction, RecordInvoiceAction, RejectOrderAction, TopUpAction,
    WithdrawProductAction,
};
use super::catalog::ProductCatalog;
use super::storage::{SettlementStorage, StorageError};
use super::traits::{CommandContext, CommandHandler, CommandMetadata};
use crate::config::StoreConfig;
use chrono::Utc;
use shared::{
    Actor, CartItemInput, Currency, InvoiceItemInput, InvoiceItemRecord, Money, OrderRecord,
    PaymentRecord, PriceAction, ProductInfo, Role, TopUpRecord,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// SettlementManager for order, payment and ledger operations
pub struct SettlementManager {
    storage: SettlementStorage,
    catalog: Arc<dyn ProductCatalog>,
    /// Currency every order and top-up must settle in
    settlement_currency: Currency,
}

impl std::fmt::Debug for SettlementManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettlementManager")
            .field("storage", &"<SettlementStorage>")
            .field("settlement_currency", &self.settlement_currency)
            .finish()
    }
}

impl SettlementManager {
    /// Create a new SettlementManager with the given database path
    pub fn new(
        db_path: impl AsRef<Path>,
        catalog: Arc<dyn ProductCatalog>,
        settlement_currency: Currency,
    ) -> ManagerResult<Self> {
        let storage = SettlementStorage::open(db_path)?;
        tracing::info!(currency = %settlement_currency, "SettlementManager started");
        Ok(Self {
            storage,
            catalog,
            settlement_currency,
        })
    }

    /// Create a SettlementManager from application config
    pub fn from_config(
        config: &StoreConfig,
        catalog: Arc<dyn ProductCatalog>,
    ) -> ManagerResult<Self> {
        Self::new(&config.db_path, catalog, config.settlement_currency)
    }

    /// Create a SettlementManager with existing storage (for testing)
    #[cfg(test)]
    pub fn with_storage(storage: SettlementStorage, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self {
            storage,
            catalog,
            settlement_currency: Currency::Uah,
        }
    }

    /// Get the underlying storage
    pub fn storage(&self) -> &SettlementStorage {
        &self.storage
    }

    /// Run one action inside a single write transaction
    ///
    /// Commit happens only after the action returns Ok; any error aborts the
    /// transaction, so no partially-applied operation is ever observable.
    fn execute<A: CommandHandler>(
        &self,
        action: A,
        metadata: CommandMetadata,
    ) -> ManagerResult<A::Output> {
        let txn = self.storage.begin_write()?;
        let mut ctx = CommandContext::new(&txn, &self.storage);
        let result = futures::executor::block_on(action.execute(&mut ctx, &metadata));
        drop(ctx);
        match result {
            Ok(output) => {
                txn.commit().map_err(StorageError::from)?;
                Ok(output)
            }
            Err(err) => {
                txn.abort().map_err(StorageError::from)?;
                Err(err.into())
            }
        }
    }

    fn metadata(&self, actor_id: u64, role: Role) -> CommandMetadata {
        CommandMetadata {
            actor_id,
            role,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    // ========== Ledger Operations ==========

    /// Spendable balance for a client: sum of top-ups minus sum of payments
    pub fn balance(&self, client_id: u64) -> ManagerResult<Money> {
        Ok(self.storage.balance(client_id, self.settlement_currency)?)
    }

    /// Credit a client's account (manager only)
    pub fn top_up(&self, actor: &Actor, client_id: u64, amount: Money) -> ManagerResult<TopUpRecord> {
        if amount.currency != self.settlement_currency {
            return Err(ManagerError::CurrencyMismatch {
                left: self.settlement_currency,
                right: amount.currency,
            });
        }
        let topup = self.execute(
            TopUpAction { client_id, amount },
            self.metadata(actor.id, actor.role),
        )?;
        tracing::info!(topup_id = topup.id, client_id, amount = %topup.amount, "Client account credited");
        Ok(topup)
    }

    // ========== Order Operations ==========

    /// Build a NEW order from a cart, pricing every line at the current
    /// catalog price with the actual price action applied
    pub fn create_order(
        &self,
        client_id: u64,
        currency: Currency,
        items: Vec<CartItemInput>,
    ) -> ManagerResult<OrderRecord> {
        if currency != self.settlement_currency {
            return Err(ManagerError::CurrencyMismatch {
                left: self.settlement_currency,
                right: currency,
            });
        }

        // Catalog reads happen before the transaction; the resolved prices
        // are frozen into the order lines
        let products = self.resolve_products(&items)?;
        let price_action = self.catalog.actual_price_action();

        let order = self.execute(
            CreateOrderAction {
                client_id,
                currency,
                items,
                products,
                price_action,
            },
            self.metadata(client_id, Role::Client),
        )?;
        tracing::info!(
            order_id = order.id,
            client_id,
            amount = %order.amount,
            item_count = order.items.len(),
            "Order created"
        );
        Ok(order)
    }

    /// Settle a NEW order against the client's balance
    pub fn pay_order(&self, client_id: u64, order_id: u64) -> ManagerResult<PaymentRecord> {
        let payment = self.execute(
            PayOrderAction {
                client_id,
                order_id,
            },
            self.metadata(client_id, Role::Client),
        )?;
        tracing::info!(
            payment_id = payment.id,
            order_id,
            client_id,
            amount = %payment.amount,
            "Order paid"
        );
        Ok(payment)
    }

    /// Reject a NEW order; clients may reject only their own
    pub fn reject_order(&self, actor: &Actor, order_id: u64) -> ManagerResult<OrderRecord> {
        let order = self.execute(
            RejectOrderAction { order_id },
            self.metadata(actor.id, actor.role),
        )?;
        tracing::info!(order_id, status = ?order.status, "Order rejected");
        Ok(order)
    }

    /// Reject every NEW order containing a withdrawn product
    ///
    /// Returns the ids of the rejected orders; all of them flip in one
    /// transaction.
    pub fn on_product_withdrawn(&self, product_id: u64) -> ManagerResult<Vec<u64>> {
        let rejected = self.execute(
            WithdrawProductAction { product_id },
            self.metadata(0, Role::Manager),
        )?;
        tracing::info!(
            product_id,
            rejected_count = rejected.len(),
            "Product withdrawn, open orders rejected"
        );
        Ok(rejected)
    }

    // ========== Inventory Operations ==========

    /// Sellable quantity for a product: stock-in minus NEW/PAID reservations
    pub fn available_quantity(&self, product_id: u64) -> ManagerResult<u32> {
        Ok(self.storage.available_quantity(product_id)?)
    }

    /// Record a supplier invoice as stock-in entries (manager only)
    pub fn record_invoice(
        &self,
        actor: &Actor,
        items: Vec<InvoiceItemInput>,
    ) -> ManagerResult<Vec<InvoiceItemRecord>> {
        let records = self.execute(
            RecordInvoiceAction { items },
            self.metadata(actor.id, actor.role),
        )?;
        tracing::info!(item_count = records.len(), "Invoice recorded");
        Ok(records)
    }

    // ========== Public Query Methods ==========

    /// Get an order by id
    pub fn get_order(&self, order_id: u64) -> ManagerResult<Option<OrderRecord>> {
        Ok(self.storage.get_order(order_id)?)
    }

    /// All orders for a client, newest first
    pub fn orders_for_client(&self, client_id: u64) -> ManagerResult<Vec<OrderRecord>> {
        Ok(self.storage.orders_for_client(client_id)?)
    }

    /// All payments for a client, newest first
    pub fn payments_for_client(&self, client_id: u64) -> ManagerResult<Vec<PaymentRecord>> {
        Ok(self.storage.payments_for_client(client_id)?)
    }

    /// Resolve every distinct cart product through the catalog
    fn resolve_products(
        &self,
        items: &[CartItemInput],
    ) -> ManagerResult<HashMap<u64, ProductInfo>> {
        let mut products = HashMap::with_capacity(items.len());
        for item in items {
            if products.contains_key(&item.product_id) {
                continue;
            }
            let product = self
                .catalog
                .product(item.product_id)
                .ok_or(ManagerError::ProductNotFound(item.product_id))?;
            products.insert(item.product_id, product);
        }
        Ok(products)
    }

    /// Actual price action as the catalog currently reports it
    pub fn actual_price_action(&self) -> Option<PriceAction> {
        self.catalog.actual_price_action()
    }
}

// Make SettlementManager Clone-able via Arc'd internals
impl Clone for SettlementManager {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            catalog: self.catalog.clone(),
            settlement_currency: self.settlement_currency,
        }
    }
}

#[cfg(test)]
mod tests;
