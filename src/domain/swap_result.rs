//! Outcome of a swap computation.

use serde::{Deserialize, Serialize};

use super::{Amount, Side};
use crate::error::AmmError;

/// The amounts a swap exchanges, as computed against a reserve snapshot.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee < amount_in`.
///
/// # Examples
///
/// ```
/// use simple_amm::domain::{Amount, Side, SwapResult};
///
/// let result = SwapResult::new(Side::A, Amount::new(100), Amount::new(4), Amount::new(1));
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapResult {
    side_in: Side,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    /// Creates a new `SwapResult` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if either amount is zero or the
    /// fee is not smaller than the input.
    pub const fn new(
        side_in: Side,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(AmmError::InvalidQuantity("swap output rounds to zero"));
        }
        if fee.get() >= amount_in.get() {
            return Err(AmmError::InvalidQuantity("fee must be less than amount_in"));
        }
        Ok(Self {
            side_in,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// The pool side that receives the input.
    #[must_use]
    pub const fn side_in(&self) -> Side {
        self.side_in
    }

    /// Returns the input amount, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the part of the input retained as fee.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}
