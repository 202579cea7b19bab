//! Product catalog collaborator seam
//!
//! Catalog CRUD lives outside the settlement core. The core only needs two
//! lookups at order-creation time, expressed by [`ProductCatalog`]; the
//! catalog side in turn notifies the core of withdrawals via
//! `SettlementManager::on_product_withdrawn`.

use parking_lot::RwLock;
use shared::{PriceAction, ProductInfo};
use std::collections::HashMap;

/// Lookups the settlement core consumes from the catalog
pub trait ProductCatalog: Send + Sync {
    /// Resolve a product by id; `None` means the product does not exist
    /// or has been withdrawn
    fn product(&self, product_id: u64) -> Option<ProductInfo>;

    /// The "actual" price action: the active one with the latest date
    fn actual_price_action(&self) -> Option<PriceAction>;
}

/// In-memory catalog for tests and single-process embeddings
#[derive(Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<u64, ProductInfo>>,
    price_actions: RwLock<Vec<PriceAction>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_product(&self, product: ProductInfo) {
        self.products.write().insert(product.id, product);
    }

    pub fn remove_product(&self, product_id: u64) {
        self.products.write().remove(&product_id);
    }

    pub fn push_price_action(&self, action: PriceAction) {
        self.price_actions.write().push(action);
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn product(&self, product_id: u64) -> Option<ProductInfo> {
        self.products.read().get(&product_id).cloned()
    }

    fn actual_price_action(&self) -> Option<PriceAction> {
        self.price_actions
            .read()
            .iter()
            .filter(|a| a.active)
            .max_by_key(|a| a.date)
            .cloned()
    }
}
