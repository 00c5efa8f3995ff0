//! Type-safe price representation using decimal arithmetic.
//!
//! The backend computes every total (cart lines, booking totals); prices
//! here exist only to be carried and displayed, never to be summed into new
//! business amounts. The backend serializes amounts as bare JSON numbers,
//! so `Price` converts to and from a plain [`Decimal`] on the wire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paisa).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "Rs. 1499.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{} {}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::default())
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.amount
    }
}

/// ISO 4217 currency codes.
///
/// The business operates in Nepal; NPR is the default and the only currency
/// the payment gateway settles in today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    NPR,
    INR,
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::NPR | Self::INR => "Rs.",
            Self::USD => "$",
        }
    }

    /// ISO 4217 code string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NPR => "NPR",
            Self::INR => "INR",
            Self::USD => "USD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_to_two_places() {
        let price = Price::from(Decimal::new(14995, 1)); // 1499.5
        assert_eq!(price.display(), "Rs. 1499.50");
    }

    #[test]
    fn test_deserialize_from_bare_number() {
        let price: Price = serde_json::from_str("45000").unwrap();
        assert_eq!(price.amount, Decimal::from(45000));
        assert_eq!(price.currency_code, CurrencyCode::NPR);
    }

    #[test]
    fn test_deserialize_from_string_amount() {
        // Some endpoints quote amounts; Decimal accepts both representations.
        let price: Price = serde_json::from_str("\"250.75\"").unwrap();
        assert_eq!(price.display(), "Rs. 250.75");
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::from(Decimal::new(250, 0));
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
