//! Availability projection over stock-in and order reservations
//!
//! `available = stock_in − reserved`, where `reserved` counts order items in
//! NEW or PAID orders. The result is floored at zero: a skew between invoices
//! and orders is absorbed here, not raised. This figure is advisory for
//! product listings; it is not a stock-reservation lock.

use redb::ReadableTable;
use shared::{InvoiceItemRecord, OrderRecord};

use super::storage::StorageResult;

/// Compute a product's sellable quantity from the stock and order tables
pub fn available_from_tables(
    invoice_items: &impl ReadableTable<u64, &'static [u8]>,
    orders: &impl ReadableTable<u64, &'static [u8]>,
    product_id: u64,
) -> StorageResult<u32> {
    let mut stock_in: i64 = 0;
    for row in invoice_items.iter()? {
        let (_, value) = row?;
        let item: InvoiceItemRecord = serde_json::from_slice(value.value())?;
        if item.product_id == product_id {
            stock_in += i64::from(item.quantity);
        }
    }

    let mut reserved: i64 = 0;
    for row in orders.iter()? {
        let (_, value) = row?;
        let order: OrderRecord = serde_json::from_slice(value.value())?;
        if !order.status.reserves_stock() {
            continue;
        }
        for item in &order.items {
            if item.product_id == product_id {
                reserved += i64::from(item.count);
            }
        }
    }

    Ok((stock_in - reserved).max(0) as u32)
}
