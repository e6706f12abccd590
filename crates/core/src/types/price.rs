//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront sells in a single currency (Indian rupees), so a price is
//! just a non-negative amount.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The input is not a number.
    #[error("price is not a number: {0:?}")]
    NotANumber(String),
}

/// A non-negative price in rupees.
///
/// Serialized as a bare JSON number (`199`, `12.5`), the shape the catalog
/// API and the persisted cart both use.
///
/// ```
/// use urvann_core::Price;
///
/// let fern = Price::from_major(199);
/// assert_eq!(fern.checked_mul(2).unwrap().to_string(), "₹398.00");
/// assert!(Price::parse("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable amount.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount.normalize()))
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_major(rupees: u32) -> Self {
        Self(Decimal::from(rupees))
    }

    /// Parse a price from user or wire text such as `"199"` or `"12.50"`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotANumber`] for non-numeric text and
    /// [`PriceError::Negative`] for amounts below zero.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| PriceError::NotANumber(s.to_owned()))?;
        Self::new(amount)
    }

    /// Returns the underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the price is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `self + rhs`, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// `self * quantity`, or `None` on overflow.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Returns `true` if the price comes back unchanged after being written
    /// as a JSON number and read again.
    ///
    /// JSON numbers travel as `f64`, which holds about 15 significant digits.
    #[must_use]
    pub fn survives_json_number(self) -> bool {
        serde_json::to_string(&self)
            .ok()
            .and_then(|json| serde_json::from_str::<Self>(&json).ok())
            .is_some_and(|back| back == self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{:.2}", self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 0)),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_new_accepts_zero() {
        assert!(Price::new(Decimal::ZERO).unwrap().is_zero());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Price::parse("199").unwrap(), Price::from_major(199));
        assert_eq!(Price::parse(" 12.50 ").unwrap().amount(), Decimal::new(125, 1));
        assert!(matches!(Price::parse("abc"), Err(PriceError::NotANumber(_))));
        assert!(matches!(Price::parse("NaN"), Err(PriceError::NotANumber(_))));
    }

    #[test]
    fn test_arithmetic() {
        let total = Price::from_major(199)
            .checked_mul(2)
            .and_then(|p| p.checked_add(Price::from_major(50)))
            .unwrap();
        assert_eq!(total, Price::from_major(448));
    }

    #[test]
    fn test_arithmetic_overflow_is_none() {
        assert_eq!(Price::MAX.checked_mul(2), None);
        assert_eq!(Price::MAX.checked_add(Price::from_major(1)), None);
        assert_eq!(Price::MAX.checked_mul(1), Some(Price::MAX));
        assert_eq!(Price::MAX.checked_add(Price::ZERO), Some(Price::MAX));
    }

    #[test]
    fn test_survives_json_number() {
        for price in ["199", "19.99", "0.1", "349.95", "1999.99", "0"] {
            assert!(Price::parse(price).unwrap().survives_json_number(), "{price}");
        }
        assert!(!Price::parse("1234567890123456.78").unwrap().survives_json_number());
        assert!(!Price::parse("0.12345678901234567891").unwrap().survives_json_number());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_major(995).to_string(), "₹995.00");
        assert_eq!(Price::parse("12.5").unwrap().to_string(), "₹12.50");
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Price::from_major(199)).unwrap();
        assert_eq!(json, "199.0");
        let back: Price = serde_json::from_str("199").unwrap();
        assert_eq!(back, Price::from_major(199));
        assert!(serde_json::from_str::<Price>("-5").is_err());
    }
}
