//! Pricing arithmetic for order creation
//!
//! Unit prices come from the catalog, get the actual price action applied,
//! and are rounded to minor units half-up exactly once. Line amounts are the
//! rounded unit price times the count, so the order total always equals the
//! sum of the persisted line amounts with no second rounding path.

use shared::{CartItemInput, Money, PriceAction};

use super::traits::SettlementError;

/// Maximum allowed quantity per order line
pub const MAX_QUANTITY: u32 = 9999;

/// Validate a requested order line
pub fn validate_cart_item(item: &CartItemInput) -> Result<(), SettlementError> {
    if item.count < 1 || item.count > MAX_QUANTITY {
        return Err(SettlementError::InvalidQuantity {
            product_id: item.product_id,
            count: item.count,
        });
    }
    Ok(())
}

/// Unit price after the actual price action, rounded to minor units
///
/// `base × (100 − discount) / 100`, half-up. No action means the base price
/// unchanged.
pub fn discounted_unit_price(base: &Money, action: Option<&PriceAction>) -> Money {
    match action {
        Some(action) => base.with_discount(action.discount),
        None => base.rounded(),
    }
}

/// Frozen line amount: discounted unit price × count
pub fn line_amount(unit_price: &Money, count: u32) -> Money {
    unit_price.mul_count(count)
}
