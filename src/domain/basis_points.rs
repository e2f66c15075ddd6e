//! Basis-point representation for percentages.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::AmmError;

/// Maximum value that represents 100%.
const MAX_BPS: u16 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Every `u16` can be wrapped, but values above 10 000 are nonsensical as
/// percentages; [`is_valid_percent`](Self::is_valid_percent) checks the
/// range and the fee paths reject anything outside it.
///
/// # Examples
///
/// ```
/// use simple_amm::domain::BasisPoints;
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.get(), 30);
/// assert!(bp.is_valid_percent());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// The denominator every basis-point computation divides by.
    pub const DENOMINATOR: u128 = MAX_BPS as u128;

    /// Creates a new `BasisPoints` from a raw `u16` value.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the underlying `u16` value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Returns `true` if the value is in the valid percentage range (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BPS
    }

    /// Returns `10_000 - self`, the share left after taking this percentage.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the value exceeds 100%.
    pub const fn complement(&self) -> crate::error::Result<Self> {
        if self.0 > MAX_BPS {
            return Err(AmmError::InvalidFee("basis points exceed 10000"));
        }
        Ok(Self(MAX_BPS - self.0))
    }

    /// Computes `amount * self / 10_000` with explicit rounding.
    ///
    /// The product is formed in `u128`, so it cannot overflow; the result
    /// never exceeds `amount` for a valid percentage.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the value exceeds 100%.
    pub const fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        if self.0 > MAX_BPS {
            return Err(AmmError::InvalidFee("basis points exceed 10000"));
        }
        let product = amount.widen() * self.0 as u128;
        let q = product / Self::DENOMINATOR;
        let adjusted = match rounding {
            Rounding::Up if product % Self::DENOMINATOR != 0 => q + 1,
            _ => q,
        };
        // adjusted <= amount because self <= 100%.
        Ok(Amount::new(adjusted as u64))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
