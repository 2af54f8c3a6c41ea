//! Type-safe price representation using decimal arithmetic.
//!
//! Brunela sells in Colombian pesos with no cents subdivision, so a [`Price`]
//! is always a whole number of pesos. Amounts serialize as plain JSON numbers
//! to stay compatible with the cart layout written by the browser pages.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};

/// A price in whole Colombian pesos.
///
/// Serializes as a JSON integer (`2500`, not `2500.0`). Any JSON number
/// deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Price(
    #[serde(
        serialize_with = "serialize_pesos",
        deserialize_with = "rust_decimal::serde::float::deserialize"
    )]
    Decimal,
);

fn serialize_pesos<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    match amount.to_u64() {
        Some(pesos) if amount.fract().is_zero() => serializer.serialize_u64(pesos),
        _ => rust_decimal::serde::float::serialize(amount, serializer),
    }
}

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from whole pesos.
    #[must_use]
    pub fn from_pesos(pesos: u64) -> Self {
        Self(Decimal::from(pesos))
    }

    /// Create a price from a decimal amount.
    ///
    /// Returns `None` for negative or fractional amounts.
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO && amount.fract().is_zero()).then_some(Self(amount.normalize()))
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Format for display with es-CO grouping, e.g. `$25.000`.
    #[must_use]
    pub fn display(&self) -> String {
        let digits = self.0.trunc().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        format!("${grouped}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.display())
    }
}

impl From<u32> for Price {
    fn from(pesos: u32) -> Self {
        Self(Decimal::from(pesos))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
