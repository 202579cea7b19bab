//! Currency-tagged money type backed by `rust_decimal`
//!
//! All monetary amounts in the settlement core carry their currency. Amounts
//! in different currencies are never implicitly summed or compared; every
//! cross-currency operation fails with [`MoneyError::CurrencyMismatch`].
//!
//! Rounding policy: monetary values are rounded to 2 minor-unit decimals,
//! half-up (`MidpointAwayFromZero`), applied once at pricing time.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minor-unit precision for all supported currencies
const DECIMAL_PLACES: u32 = 2;

/// Settlement currencies accepted by the store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Uah,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Uah => "UAH",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "UAH" => Ok(Currency::Uah),
            other => Err(MoneyError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Money errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

/// An amount denominated in a settlement currency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Zero in the given currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Add, failing on mismatched currencies
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.require_same_currency(other)?;
        Ok(Money::new(self.amount + other.amount, self.currency))
    }

    /// Subtract, failing on mismatched currencies
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.require_same_currency(other)?;
        Ok(Money::new(self.amount - other.amount, self.currency))
    }

    /// Compare, failing on mismatched currencies
    pub fn try_cmp(&self, other: &Money) -> Result<Ordering, MoneyError> {
        self.require_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// `self >= other`, failing on mismatched currencies
    pub fn try_ge(&self, other: &Money) -> Result<bool, MoneyError> {
        Ok(self.try_cmp(other)? != Ordering::Less)
    }

    /// Multiply by an item count. The unit amount is expected to already be
    /// rounded to minor units, so the product needs no further rounding.
    pub fn mul_count(&self, count: u32) -> Money {
        Money::new(self.amount * Decimal::from(count), self.currency)
    }

    /// Apply a percentage discount: `amount × (100 − percent) / 100`,
    /// rounded half-up to minor units. Discounts above 100% clamp to free.
    pub fn with_discount(&self, percent: u32) -> Money {
        let remaining = Decimal::from(100u32.saturating_sub(percent));
        let discounted = self.amount * remaining / Decimal::from(100u32);
        Money::new(
            discounted.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero),
            self.currency,
        )
    }

    /// Round to minor-unit precision, half-up
    pub fn rounded(&self) -> Money {
        Money::new(
            self.amount
                .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero),
            self.currency,
        )
    }

    fn require_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
