//! Shared types for the storefront settlement core
//!
//! Domain value types used across the settlement crate and any embedding
//! request layer: money, order/payment/top-up records, catalog types,
//! actor roles and the public error envelope.

pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod types;

// Re-exports
pub use catalog::{InvoiceItemInput, InvoiceItemRecord, PriceAction, ProductInfo};
pub use error::{ApiError, ErrorKind};
pub use money::{Currency, Money, MoneyError};
pub use order::{
    CartItemInput, OrderItemRecord, OrderRecord, OrderStatus, PaymentRecord, TopUpRecord,
};
pub use types::{Actor, Role};
