//! Order, payment and top-up records
//!
//! These are the persisted shapes of the settlement ledger. An order owns its
//! items (cascade lifecycle); payments reference but do not own orders.
//! Line amounts are frozen at order-creation time and never recomputed from
//! current product prices.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order status
///
/// `New` is the only non-terminal state. Orders in `New` or `Paid` reserve
/// product stock; rejected orders release it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    New,
    Paid,
    Rejected,
    RejectedByManager,
    RejectedByClient,
}

impl OrderStatus {
    /// Terminal states admit no further transition
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::New)
    }

    /// Whether orders in this status count against product availability
    pub fn reserves_stock(&self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::Paid)
    }
}

/// A single order line: product, count and frozen line amount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemRecord {
    pub product_id: u64,
    pub count: u32,
    /// Discounted unit price × count, frozen at order creation
    pub amount: Money,
}

/// A client order with its priced items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    /// Order ID (assigned by storage)
    pub id: u64,
    /// External identity for the excluded response layer
    pub uuid: Uuid,
    pub client_id: u64,
    /// Sum of item amounts, accumulated at creation
    pub amount: Money,
    pub status: OrderStatus,
    pub items: Vec<OrderItemRecord>,
    /// Creation timestamp (UTC millis)
    pub created_at: i64,
    /// Last update timestamp (UTC millis)
    pub updated_at: i64,
    /// Set when the order transitions to `Paid`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<i64>,
}

impl OrderRecord {
    /// Create a new empty order in `New` status
    pub fn new(id: u64, client_id: u64, currency: Currency, now: i64) -> Self {
        Self {
            id,
            uuid: Uuid::new_v4(),
            client_id,
            amount: Money::zero(currency),
            status: OrderStatus::New,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
            paid_at: None,
        }
    }

    pub fn contains_product(&self, product_id: u64) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }
}

/// A settled payment against an order
///
/// Exactly one exists per paid order; its amount equals the order's frozen
/// total at the time of payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub id: u64,
    pub uuid: Uuid,
    pub client_id: u64,
    pub order_id: u64,
    pub amount: Money,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A manager-issued account credit. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopUpRecord {
    pub id: u64,
    pub client_id: u64,
    pub amount: Money,
    pub created_at: i64,
}

/// Requested order line from the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItemInput {
    pub product_id: u64,
    pub count: u32,
}
