//! Storefront settlement core
//!
//! Order/payment settlement and balance accounting for the store backend.
//! The excluded request layer (routing, auth, serialization) calls into
//! [`SettlementManager`] and receives records or typed [`shared::ApiError`]
//! failures back.
//!
//! # Module structure
//!
//! ```text
//! store-core/src/
//! ├── config.rs      # Environment-driven configuration
//! ├── logger.rs      # tracing-subscriber setup for embedding binaries
//! └── settlement/    # The settlement core
//!     ├── storage.rs     # redb persistence (orders, payments, ledger, stock)
//!     ├── money.rs       # Pricing arithmetic and quantity validation
//!     ├── ledger.rs      # Balance projection over top-ups and payments
//!     ├── inventory.rs   # Availability projection over stock-in and orders
//!     ├── catalog.rs     # ProductCatalog collaborator seam
//!     ├── traits.rs      # CommandHandler / CommandContext
//!     ├── actions/       # One state transition per file
//!     └── manager/       # SettlementManager facade + error mapping
//! ```

pub mod config;
pub mod logger;
pub mod settlement;

// Re-export public types
pub use config::StoreConfig;
pub use settlement::catalog::{InMemoryCatalog, ProductCatalog};
pub use settlement::manager::{ManagerError, ManagerResult, SettlementManager};
pub use settlement::storage::SettlementStorage;

// Re-export shared types for convenience
pub use shared::{
    Actor, ApiError, CartItemInput, Currency, ErrorKind, InvoiceItemInput, InvoiceItemRecord,
    Money, OrderRecord, OrderStatus, PaymentRecord, PriceAction, ProductInfo, Role, TopUpRecord,
};
