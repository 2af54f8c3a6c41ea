//! Cart line quantity.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is below [`Quantity::MIN`].
    #[error("quantity must be at least {min} (got {got})")]
    BelowMinimum {
        /// Smallest allowed quantity.
        min: u32,
        /// Rejected value.
        got: i64,
    },
    /// The value is above [`Quantity::MAX`].
    #[error("quantity must be at most {max} (got {got})")]
    AboveMaximum {
        /// Largest allowed quantity.
        max: u32,
        /// Rejected value.
        got: i64,
    },
}

/// Number of units of one line item, always within `1..=99`.
///
/// Deserialization applies the same range check as [`Quantity::new`], so a
/// stored line with a quantity outside the range fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest quantity a line item can hold.
    pub const MIN: u32 = 1;
    /// Largest quantity a line item can hold.
    pub const MAX: u32 = 99;
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Validate a raw quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError`] when `value` is outside `1..=99`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < i64::from(Self::MIN) {
            return Err(QuantityError::BelowMinimum {
                min: Self::MIN,
                got: value,
            });
        }
        if value > i64::from(Self::MAX) {
            return Err(QuantityError::AboveMaximum {
                max: Self::MAX,
                got: value,
            });
        }
        // Range-checked above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(value as u32))
    }

    /// The quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more unit, or `None` at the upper bound.
    #[must_use]
    pub const fn incremented(self) -> Option<Self> {
        if self.0 >= Self::MAX {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }

    /// One fewer unit, or `None` at the lower bound.
    #[must_use]
    pub const fn decremented(self) -> Option<Self> {
        if self.0 <= Self::MIN {
            None
        } else {
            Some(Self(self.0 - 1))
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(Quantity::new(1).unwrap().get(), 1);
        assert_eq!(Quantity::new(99).unwrap().get(), 99);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            Quantity::new(0),
            Err(QuantityError::BelowMinimum { got: 0, .. })
        ));
        assert!(matches!(
            Quantity::new(-5),
            Err(QuantityError::BelowMinimum { got: -5, .. })
        ));
        assert!(matches!(
            Quantity::new(100),
            Err(QuantityError::AboveMaximum { got: 100, .. })
        ));
    }

    #[test]
    fn test_step_stops_at_bounds() {
        assert_eq!(Quantity::ONE.decremented(), None);
        assert_eq!(Quantity::new(2).unwrap().decremented(), Some(Quantity::ONE));
        assert_eq!(Quantity::new(99).unwrap().incremented(), None);
        assert_eq!(Quantity::ONE.incremented(), Some(Quantity::new(2).unwrap()));
    }

    #[test]
    fn test_deserialize_checks_range() {
        let quantity: Quantity = serde_json::from_str("7").unwrap();
        assert_eq!(quantity.get(), 7);
        assert_eq!(serde_json::to_string(&quantity).unwrap(), "7");

        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("100").is_err());
        assert!(serde_json::from_str::<Quantity>("4294967295").is_err());
        assert!(serde_json::from_str::<Quantity>("-3").is_err());
    }
}
