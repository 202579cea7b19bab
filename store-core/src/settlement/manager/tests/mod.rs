use super::*;
use crate::settlement::catalog::InMemoryCatalog;
use crate::settlement::storage::SettlementStorage;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::OrderStatus;

mod test_boundary;
mod test_core;

fn uah(value: i64) -> Money {
    Money::new(Decimal::from(value), Currency::Uah)
}

fn uah_str(value: &str) -> Money {
    Money::new(value.parse().unwrap(), Currency::Uah)
}

fn create_test_manager() -> (SettlementManager, Arc<InMemoryCatalog>) {
    let storage = SettlementStorage::open_in_memory().unwrap();
    let catalog = Arc::new(InMemoryCatalog::new());
    let manager = SettlementManager::with_storage(storage, catalog.clone());
    (manager, catalog)
}

fn seed_product(catalog: &InMemoryCatalog, id: u64, price: Money) {
    catalog.insert_product(ProductInfo {
        id,
        name: format!("Product {id}"),
        price,
    });
}

fn price_action(id: u64, date: (i32, u32, u32), discount: u32, active: bool) -> PriceAction {
    PriceAction {
        id,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        discount,
        active,
    }
}

fn cart(items: &[(u64, u32)]) -> Vec<CartItemInput> {
    items
        .iter()
        .map(|&(product_id, count)| CartItemInput { product_id, count })
        .collect()
}

fn manager_actor() -> Actor {
    Actor::manager(1)
}

/// Credit a client through the public top-up path
fn credit(manager: &SettlementManager, client_id: u64, amount: Money) {
    manager.top_up(&manager_actor(), client_id, amount).unwrap();
}

/// Record stock-in for a single product
fn stock(manager: &SettlementManager, product_id: u64, quantity: u32) {
    manager
        .record_invoice(
            &manager_actor(),
            vec![InvoiceItemInput {
                product_id,
                quantity,
                unit_cost: uah(1),
            }],
        )
        .unwrap();
}
