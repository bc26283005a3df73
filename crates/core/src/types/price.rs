//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront sells in euros and displays amounts the way a `fr-FR`
//! locale does: `1 234,50 €`, with a narrow no-break space between digit
//! groups and a no-break space before the currency sign.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Digit group separator used by `fr-FR` number formatting.
const GROUP_SEPARATOR: char = '\u{202f}';
/// Separator between the amount and the currency sign.
const CURRENCY_SEPARATOR: char = '\u{a0}';
const CURRENCY_SYMBOL: &str = "€";

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Prices cannot be negative.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount in euros.
///
/// Serializes as a decimal string; decodes from a string or a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Build a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units. Saturates instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let plain = format!("{rounded:.2}");
        let (units, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let digits = units.len();
        for (i, digit) in units.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                write!(f, "{GROUP_SEPARATOR}")?;
            }
            write!(f, "{digit}")?;
        }
        write!(f, ",{cents}{CURRENCY_SEPARATOR}{CURRENCY_SYMBOL}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        Price::new(s.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_rejects_negative_amounts() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display_uses_french_format() {
        assert_eq!(price("29.99").to_string(), "29,99\u{a0}€");
        assert_eq!(price("5").to_string(), "5,00\u{a0}€");
        assert_eq!(price("1234.5").to_string(), "1\u{202f}234,50\u{a0}€");
        assert_eq!(price("1234567").to_string(), "1\u{202f}234\u{202f}567,00\u{a0}€");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(price("0.005").to_string(), "0,01\u{a0}€");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [price("19.99").times(2), price("0.02").times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, price("40.00"));
    }

    #[test]
    fn test_deserialize_from_number_or_string() {
        let from_number: Price = serde_json::from_str("12.5").unwrap();
        let from_string: Price = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(from_number, from_string);
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        assert_eq!(serde_json::to_string(&price("12.50")).unwrap(), "\"12.50\"");
    }
}
