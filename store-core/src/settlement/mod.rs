//! Settlement module: orders, payments and the account ledger
//!
//! # Operation flow
//!
//! ```text
//! Request layer → SettlementManager
//!                      ├─ resolve collaborators (catalog lookup, price action)
//!                      ├─ begin write transaction
//!                      ├─ action.execute(ctx)   # validate + mutate
//!                      ├─ commit (all-or-nothing)
//!                      └─ return record | ApiError
//! ```
//!
//! Balance and availability are projections, recomputed on read from the
//! append-only ledger and the order/stock tables; neither is ever stored as
//! a mutable counter.

pub mod actions;
pub mod catalog;
pub mod inventory;
pub mod ledger;
pub mod manager;
pub mod money;
pub mod storage;
pub mod traits;

// Re-exports
pub use catalog::{InMemoryCatalog, ProductCatalog};
pub use manager::SettlementManager;
pub use storage::SettlementStorage;
pub use traits::{CommandContext, CommandHandler, CommandMetadata, SettlementError};
