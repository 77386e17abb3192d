//! # Money
//!
//! Prices and totals as integer cents.
//!
//! ## Wire vs Memory
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  backend JSON            decode                 in memory               │
//! │  "price": 10.99  ─────── from_dollars ───────►  Money(1099)             │
//! │                                                    │                    │
//! │                                          line totals, cart total        │
//! │                                          (i64 arithmetic only)          │
//! │                                                    │                    │
//! │  "total": 21.98  ◄────── to_dollars ────────────  Money(2198)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Floats appear only inside [`dollars`], the serde adapter for wire fields.
//!
//! ```rust
//! use storefront_core::money::Money;
//!
//! let line = Money::from_cents(1099) * 2;
//! let total: Money = [line, Money::from_cents(500)].into_iter().sum();
//! assert_eq!(total.cents(), 2698);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// An amount in cents. May be negative.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Decodes a decimal dollar amount, rounding to the nearest cent.
    /// NaN and infinities decode as zero.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_dollars(19.99).cents(), 1999);
    /// assert_eq!(Money::from_dollars(0.1 + 0.2).cents(), 30);
    /// ```
    pub fn from_dollars(dollars: f64) -> Self {
        if dollars.is_finite() {
            Money((dollars * 100.0).round() as i64)
        } else {
            Money(0)
        }
    }

    /// Encodes as decimal dollars.
    #[inline]
    pub fn to_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// The 0-99 cents after the decimal point, without sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde adapter for fields carried as decimal dollars on the wire.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::dollars")]
/// pub price: Money,
/// ```
pub mod dollars {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(value.to_dollars())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(Money::from_dollars)
    }
}

// =============================================================================
// Operators
// =============================================================================

/// `$12.34`, no grouping. UI text goes through [`crate::format::format_price`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "${}.{:02}", self.dollars().unsigned_abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

/// Line total: unit price times quantity.
impl Mul<i64> for Money {
    type Output = Money;

    #[inline]
    fn mul(self, quantity: i64) -> Money {
        Money(self.0 * quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let price = Money::from_cents(1099);
        assert_eq!(price.dollars(), 10);
        assert_eq!(price.cents_part(), 99);
        assert_eq!(Money::from_cents(-550).cents_part(), 50);
    }

    #[test]
    fn test_decoding_rounds_and_rejects_non_finite() {
        assert_eq!(Money::from_dollars(10.0).cents(), 1000);
        assert_eq!(Money::from_dollars(7.777).cents(), 778);
        assert_eq!(Money::from_dollars(f64::NAN), Money::default());
        assert_eq!(Money::from_dollars(f64::NEG_INFINITY), Money::default());
    }

    #[test]
    fn test_display_keeps_sign_outside_symbol() {
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(123456).to_string(), "$1234.56");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
    }

    #[test]
    fn test_line_totals_sum() {
        let total: Money = [(1250, 2), (99, 3), (1, 1)]
            .into_iter()
            .map(|(cents, qty)| Money::from_cents(cents) * qty)
            .sum();
        assert_eq!(total.cents(), 2798);
        assert!(!total.is_zero());
    }

    #[test]
    fn test_dollars_wire_format() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "dollars")]
            price: Money,
        }

        let parsed: Priced = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        assert_eq!(parsed.price.cents(), 1250);

        let json = serde_json::to_string(&Priced {
            price: Money::from_cents(1999),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":19.99}"#);
    }
}
