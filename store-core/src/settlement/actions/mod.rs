//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and performs one
//! settlement state transition inside the manager's write transaction.

mod create_order;
mod pay_order;
mod record_invoice;
mod reject_order;
mod top_up;
mod withdraw_product;

pub use create_order::CreateOrderAction;
pub use pay_order::PayOrderAction;
pub use record_invoice::RecordInvoiceAction;
pub use reject_order::RejectOrderAction;
pub use top_up::TopUpAction;
pub use withdraw_product::WithdrawProductAction;
