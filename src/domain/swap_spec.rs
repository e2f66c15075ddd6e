//! Swap operation specification.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::AmmError;

/// Specifies what drives a swap and the caller's slippage bound.
///
/// # Invariants
///
/// The driving amount is always non-zero.
///
/// # Examples
///
/// ```
/// use simple_amm::domain::{Amount, SwapSpec};
///
/// let spec = SwapSpec::exact_in(Amount::new(100), Amount::new(4)).expect("non-zero");
/// assert_eq!(spec.to_string(), "ExactIn(100, min_out=4)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapSpec {
    /// The caller sells exactly `amount_in` and accepts no less than
    /// `minimum_amount_out`.
    ExactIn {
        /// The fixed input amount (always non-zero).
        amount_in: Amount,
        /// Slippage bound on the output.
        minimum_amount_out: Amount,
    },
    /// The caller buys exactly `amount_out` and pays no more than
    /// `maximum_amount_in`.
    ExactOut {
        /// The fixed output amount (always non-zero).
        amount_out: Amount,
        /// Slippage bound on the input.
        maximum_amount_in: Amount,
    },
}

impl SwapSpec {
    /// Creates an exact-input swap specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if `amount_in` is zero.
    pub const fn exact_in(
        amount_in: Amount,
        minimum_amount_out: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("swap amount must be non-zero"));
        }
        Ok(Self::ExactIn {
            amount_in,
            minimum_amount_out,
        })
    }

    /// Creates an exact-output swap specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if `amount_out` is zero.
    pub const fn exact_out(
        amount_out: Amount,
        maximum_amount_in: Amount,
    ) -> crate::error::Result<Self> {
        if amount_out.is_zero() {
            return Err(AmmError::InvalidQuantity("swap amount must be non-zero"));
        }
        Ok(Self::ExactOut {
            amount_out,
            maximum_amount_in,
        })
    }
}

impl fmt::Display for SwapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactIn {
                amount_in,
                minimum_amount_out,
            } => write!(f, "ExactIn({amount_in}, min_out={minimum_amount_out})"),
            Self::ExactOut {
                amount_out,
                maximum_amount_in,
            } => write!(f, "ExactOut({amount_out}, max_in={maximum_amount_in})"),
        }
    }
}
