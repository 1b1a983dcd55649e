//! Type-safe price representation for Chilean pesos.
//!
//! CLP has no minor unit in practice, so amounts are whole pesos stored as
//! `i64`. Display follows the local convention of dot-grouped thousands:
//! `Price::new(5000)` renders as `$5.000`.

use std::iter::Sum;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// A price in Chilean pesos.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero pesos.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole-peso amount.
    #[must_use]
    pub const fn new(pesos: i64) -> Self {
        Self(pesos)
    }

    /// Get the amount in whole pesos.
    #[must_use]
    pub const fn as_pesos(&self) -> i64 {
        self.0
    }

    /// Scale by a percentage factor (100 = unchanged).
    ///
    /// Used for size multipliers on personalized products, e.g. a 20-person
    /// cake at factor 150 costs 1.5x the base price. Truncates toward zero.
    #[must_use]
    pub const fn scaled(self, percent: u32) -> Self {
        Self(self.0 * percent as i64 / 100)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * i64::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let negative = self.0 < 0;
        let digits = self.0.unsigned_abs().to_string();

        // Group digits in threes from the right: 1234567 -> 1.234.567
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        if negative {
            write!(f, "-${grouped}")
        } else {
            write!(f, "${grouped}")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_thousands_grouping() {
        assert_eq!(Price::new(5000).to_string(), "$5.000");
        assert_eq!(Price::new(0).to_string(), "$0");
        assert_eq!(Price::new(999).to_string(), "$999");
        assert_eq!(Price::new(1000).to_string(), "$1.000");
        assert_eq!(Price::new(12500).to_string(), "$12.500");
        assert_eq!(Price::new(1234567).to_string(), "$1.234.567");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Price::new(-1500).to_string(), "-$1.500");
    }

    #[test]
    fn test_line_total() {
        let unit = Price::new(1000);
        assert_eq!(unit * 5, Price::new(5000));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::new(1000), Price::new(2500), Price::new(500)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(4000));
    }

    #[test]
    fn test_scaled() {
        assert_eq!(Price::new(10000).scaled(150), Price::new(15000));
        assert_eq!(Price::new(10000).scaled(100), Price::new(10000));
        // Truncation toward zero
        assert_eq!(Price::new(999).scaled(150), Price::new(1498));
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::new(4500);
        assert_eq!(serde_json::to_string(&price).unwrap(), "4500");
        let parsed: Price = serde_json::from_str("4500").unwrap();
        assert_eq!(parsed, price);
    }
}
