//! Balance projection over the top-up/payment ledger
//!
//! A client's spendable balance is never stored; it is derived on read as
//! `sum(top-ups) − sum(payments)` in the settlement currency. Ledger entries
//! in any other currency are never implicitly summed.

use redb::ReadableTable;
use rust_decimal::Decimal;
use shared::{Currency, Money, PaymentRecord, TopUpRecord};

use super::storage::StorageResult;

/// Compute a client's balance from the ledger tables
///
/// Works over both read-only and in-transaction tables, so the pay-order
/// path can re-check the balance inside its own write transaction. Absence
/// of records means a zero balance, not an error.
pub fn balance_from_tables(
    topups: &impl ReadableTable<u64, &'static [u8]>,
    payments: &impl ReadableTable<u64, &'static [u8]>,
    client_id: u64,
    currency: Currency,
) -> StorageResult<Money> {
    let mut total = Decimal::ZERO;

    for row in topups.iter()? {
        let (_, value) = row?;
        let topup: TopUpRecord = serde_json::from_slice(value.value())?;
        if topup.client_id == client_id && topup.amount.currency == currency {
            total += topup.amount.amount;
        }
    }

    for row in payments.iter()? {
        let (_, value) = row?;
        let payment: PaymentRecord = serde_json::from_slice(value.value())?;
        if payment.client_id == client_id && payment.amount.currency == currency {
            total -= payment.amount.amount;
        }
    }

    Ok(Money::new(total, currency))
}
