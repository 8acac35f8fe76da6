//! Non-negative currency amount held in whole cents.
//!
//! Uses `rust_decimal` internally so dollar totals are summed exactly,
//! without floating-point drift.

use crate::error::{AchError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A dollar amount with exactly 2 decimal places.
///
/// Sub-cent fractions are truncated when the amount is created, so `0.009`
/// becomes `0.00` and `12.345` becomes `12.34`. Every entry therefore renders
/// the same cents that the batch and file totals add up.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use nacha_writer::Amount;
///
/// let amount = Amount::from_str("100").unwrap();
/// assert_eq!(amount.to_string(), "100.00");
/// assert_eq!(amount.cents(), Some(10000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places kept.
    pub const SCALE: u32 = 2;

    /// Zero dollars.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates an amount, dropping any fraction of a cent.
    ///
    /// Fails with [`AchError::NegativeAmount`] for values below zero, and with
    /// [`AchError::InvalidField`] for values whose cents do not fit a `u64`.
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(AchError::NegativeAmount(value.to_string()));
        }

        let mut truncated = value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::ToZero);
        truncated.rescale(Self::SCALE);
        let amount = Amount(truncated);
        if truncated.scale() != Self::SCALE || amount.cents().is_none() {
            return Err(AchError::InvalidField {
                field: "amount",
                value: value.to_string(),
                reason: "too large to express in cents",
            });
        }
        Ok(amount)
    }

    /// Creates an amount from a count of cents.
    pub fn from_cents(cents: u64) -> Self {
        Amount(Decimal::from_i128_with_scale(cents as i128, Self::SCALE))
    }

    /// Returns the amount as whole cents, or `None` if it does not fit a `u64`.
    pub fn cents(&self) -> Option<u64> {
        self.0.checked_mul(Decimal::ONE_HUNDRED)?.trunc().to_u64()
    }

    /// Returns the underlying decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = AchError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed).map_err(|_| AchError::InvalidField {
            field: "amount",
            value: trimmed.to_string(),
            reason: "not a decimal number",
        })?;
        Amount::new(decimal)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
