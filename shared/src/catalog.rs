//! Catalog collaborator types
//!
//! The settlement core does not own the product catalog; it consumes product
//! and price-action lookups through these types and records stock-in from
//! supplier invoices.

use crate::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Product data the settlement core needs: identity and base price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductInfo {
    pub id: u64,
    pub name: String,
    pub price: Money,
}

/// A time-bounded uniform percentage discount
///
/// At most one is "actual" at a time: the active action with the latest date.
/// Applied to every order line at order-creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceAction {
    pub id: u64,
    pub date: NaiveDate,
    /// Percent off the base price, 0..=100
    pub discount: u32,
    pub active: bool,
}

/// Requested stock-in line from a supplier invoice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceItemInput {
    pub product_id: u64,
    pub quantity: u32,
    pub unit_cost: Money,
}

/// A persisted stock-in entry feeding product availability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceItemRecord {
    pub id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub unit_cost: Money,
    pub recorded_at: i64,
}
