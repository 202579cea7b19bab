use super::super::storage::StorageError;
use super::super::traits::SettlementError;
use shared::{ApiError, Currency, ErrorKind, Money};
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    #[error("Invalid quantity {count} for product {product_id}")]
    InvalidQuantity { product_id: u64, count: u32 },

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Order not found: {0}")]
    OrderNotFound(u64),

    #[error("Order is not payable: {0}")]
    OrderNotPayable(u64),

    #[error("Order is not rejectable: {0}")]
    OrderNotRejectable(u64),

    #[error("Insufficient funds: balance {balance}, required {required}")]
    InsufficientFunds { balance: Money, required: Money },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Classify a storage fault into a stable error kind
fn classify_storage_error(e: &StorageError) -> ErrorKind {
    match e {
        StorageError::Serialization(_) => return ErrorKind::InternalError,
        StorageError::OrderNotFound(_) => return ErrorKind::OrderNotFound,
        _ => {}
    }

    // redb errors are classified by message
    let err_str = e.to_string().to_lowercase();

    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorKind::StorageFull;
    }

    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorKind::StorageCorrupted;
    }

    // Contention and everything else redb surfaces: the caller may retry
    ErrorKind::SystemBusy
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Storage(e) => {
                let kind = classify_storage_error(&e);
                tracing::error!(error = %e, error_kind = ?kind, "Storage error occurred");
                ApiError::new(kind, e.to_string())
            }
            ManagerError::ProductNotFound(id) => ApiError::new(
                ErrorKind::ProductNotFound,
                format!("Product {id} does not exist"),
            )
            .with_field("product"),
            ManagerError::InvalidQuantity { product_id, count } => ApiError::new(
                ErrorKind::InvalidQuantity,
                format!("Invalid quantity {count} for product {product_id}"),
            )
            .with_field("count"),
            ManagerError::InvalidAmount => {
                ApiError::new(ErrorKind::InvalidAmount, "Invalid amount")
            }
            ManagerError::OrderNotFound(id) => {
                ApiError::new(ErrorKind::OrderNotFound, format!("Order {id} does not exist"))
                    .with_field("order")
            }
            ManagerError::OrderNotPayable(id) => ApiError::new(
                ErrorKind::OrderNotPayable,
                format!("You can only pay for a new order (order {id})"),
            )
            .with_field("order"),
            ManagerError::OrderNotRejectable(id) => ApiError::new(
                ErrorKind::OrderNotRejectable,
                format!("Order can be rejected only if it is a new one (order {id})"),
            )
            .with_field("order"),
            ManagerError::InsufficientFunds { balance, required } => ApiError::new(
                ErrorKind::InsufficientFunds,
                format!(
                    "The client has insufficient funds to pay for the order \
                     (balance {balance}, required {required})"
                ),
            )
            .with_field("client"),
            ManagerError::Unauthorized(msg) => ApiError::new(ErrorKind::Unauthorized, msg),
            ManagerError::CurrencyMismatch { left, right } => ApiError::new(
                ErrorKind::CurrencyMismatch,
                format!("Currency mismatch: {left} vs {right}"),
            )
            .with_field("currency"),
            ManagerError::Internal(msg) => ApiError::new(ErrorKind::InternalError, msg),
        }
    }
}

impl From<SettlementError> for ManagerError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::ProductNotFound(id) => ManagerError::ProductNotFound(id),
            SettlementError::InvalidQuantity { product_id, count } => {
                ManagerError::InvalidQuantity { product_id, count }
            }
            SettlementError::InvalidAmount => ManagerError::InvalidAmount,
            SettlementError::OrderNotFound(id) => ManagerError::OrderNotFound(id),
            SettlementError::OrderNotPayable(id) => ManagerError::OrderNotPayable(id),
            SettlementError::OrderNotRejectable(id) => ManagerError::OrderNotRejectable(id),
            SettlementError::InsufficientFunds { balance, required } => {
                ManagerError::InsufficientFunds { balance, required }
            }
            SettlementError::Unauthorized(msg) => ManagerError::Unauthorized(msg),
            SettlementError::CurrencyMismatch { left, right } => {
                ManagerError::CurrencyMismatch { left, right }
            }
            SettlementError::Storage(msg) => ManagerError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_errors_map_to_stable_kinds() {
        let api: ApiError = ManagerError::OrderNotFound(9).into();
        assert_eq!(api.kind, ErrorKind::OrderNotFound);
        assert_eq!(api.field.as_deref(), Some("order"));

        let api: ApiError = ManagerError::ProductNotFound(3).into();
        assert_eq!(api.kind, ErrorKind::ProductNotFound);
        assert_eq!(api.field.as_deref(), Some("product"));

        let api: ApiError = ManagerError::Unauthorized("nope".to_string()).into();
        assert_eq!(api.kind, ErrorKind::Unauthorized);
        assert!(api.field.is_none());
    }

    #[test]
    fn test_insufficient_funds_points_at_client_field() {
        use rust_decimal::Decimal;
        let api: ApiError = ManagerError::InsufficientFunds {
            balance: Money::new(Decimal::ZERO, Currency::Uah),
            required: Money::new(Decimal::from(100), Currency::Uah),
        }
        .into();
        assert_eq!(api.kind, ErrorKind::InsufficientFunds);
        assert_eq!(api.field.as_deref(), Some("client"));
        assert!(api.message.contains("insufficient funds"));
    }
}
