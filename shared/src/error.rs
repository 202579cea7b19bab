//! Public error envelope for the settlement core
//!
//! Every failure crossing the core boundary is an [`ApiError`]: a stable
//! machine-readable kind, a human-readable message and an optional field
//! reference. The embedding request layer maps kinds to transport status
//! codes; no internal state leaks on failure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable error kinds
///
/// Business kinds represent rule violations and are never retried. The
/// storage kinds (`SYSTEM_BUSY`, `STORAGE_FULL`, `STORAGE_CORRUPTED`) surface
/// persistence-layer faults unchanged for the caller's retry policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ProductNotFound,
    InvalidQuantity,
    InvalidAmount,
    OrderNotFound,
    OrderNotPayable,
    OrderNotRejectable,
    InsufficientFunds,
    Unauthorized,
    CurrencyMismatch,
    // Storage faults
    SystemBusy,
    StorageFull,
    StorageCorrupted,
    InternalError,
}

impl ErrorKind {
    /// Whether a caller may reasonably retry the operation unchanged
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::SystemBusy)
    }
}

/// Typed failure returned to the excluded request layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    /// Request field the error relates to, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{:?} ({}): {}", self.kind, field, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_format() {
        let kind = serde_json::to_string(&ErrorKind::InsufficientFunds).unwrap();
        assert_eq!(kind, "\"INSUFFICIENT_FUNDS\"");
    }

    #[test]
    fn test_field_omitted_when_absent() {
        let err = ApiError::new(ErrorKind::OrderNotFound, "Order not found: 9");
        let json = serde_json::to_string(&err).unwrap();
        assert!(!json.contains("field"));

        let err = err.with_field("order");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"field\":\"order\""));
    }

    #[test]
    fn test_only_storage_contention_is_transient() {
        assert!(ErrorKind::SystemBusy.is_transient());
        assert!(!ErrorKind::InsufficientFunds.is_transient());
        assert!(!ErrorKind::InternalError.is_transient());
    }
}
