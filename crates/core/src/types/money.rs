//! Type-safe money representation using decimal arithmetic.
//!
//! The storefront sells in Argentine pesos and displays amounts without
//! decimal places (`$12.500` style grouping is left to the UI; we render
//! `$12500`). Amounts are kept as [`Decimal`] end to end - floats never touch
//! an order total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (pesos, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Zero in the default currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            amount: Decimal::ZERO,
            currency: Currency::Ars,
        }
    }

    /// An amount of Argentine pesos from a whole-peso value.
    #[must_use]
    pub fn ars(pesos: i64) -> Self {
        Self {
            amount: Decimal::from(pesos),
            currency: Currency::Ars,
        }
    }

    /// Add another amount of the same currency.
    ///
    /// Returns `None` when the currencies differ - totals must never be
    /// computed across currencies.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.currency != other.currency {
            return None;
        }
        Some(Self {
            amount: self.amount.checked_add(other.amount)?,
            currency: self.currency,
        })
    }

    /// Multiply by a line-item quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency: self.currency,
        }
    }

    /// Format for display, e.g. `$12500`.
    ///
    /// Peso prices are whole numbers by store convention; fractional amounts
    /// keep their decimals rather than silently rounding.
    #[must_use]
    pub fn display(&self) -> String {
        let normalized = self.amount.normalize();
        format!("{}{}", self.currency.symbol(), normalized)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// ISO 4217 currency codes accepted by the payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Argentine peso - the store's default.
    #[default]
    Ars,
    /// US dollar.
    Usd,
}

impl Currency {
    /// Currency symbol used for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Ars | Self::Usd => "$",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Ars => "ARS",
            Self::Usd => "USD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ars_display_has_no_decimals() {
        assert_eq!(Money::ars(12500).display(), "$12500");
        assert_eq!(Money::ars(0).display(), "$0");
    }

    #[test]
    fn test_checked_add_same_currency() {
        let total = Money::ars(2500).checked_add(Money::ars(8000));
        assert_eq!(total, Some(Money::ars(10500)));
    }

    #[test]
    fn test_checked_add_rejects_mixed_currencies() {
        let usd = Money::new(Decimal::from(10), Currency::Usd);
        assert_eq!(Money::ars(10).checked_add(usd), None);
    }

    #[test]
    fn test_times_quantity() {
        assert_eq!(Money::ars(1000).times(2), Money::ars(2000));
        assert_eq!(Money::ars(500).times(1), Money::ars(500));
    }

    #[test]
    fn test_currency_serde_uppercase() {
        let json = serde_json::to_string(&Currency::Ars).expect("serialize");
        assert_eq!(json, "\"ARS\"");
        let back: Currency = serde_json::from_str("\"USD\"").expect("deserialize");
        assert_eq!(back, Currency::Usd);
    }
}
