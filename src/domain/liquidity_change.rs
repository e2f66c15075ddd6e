//! Deposit bounds and the outcomes of liquidity changes.

use serde::{Deserialize, Serialize};

use super::{Amount, Liquidity};

/// Caller-supplied amounts for a two-sided deposit, in canonical `(a, b)`
/// order.
///
/// The desired amounts cap what the engine may draw; the minimums bound
/// the caller's exposure to reserve movement between submission and
/// execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepositBounds {
    /// Most of asset A the caller is willing to deposit.
    pub amount_a_desired: Amount,
    /// Most of asset B the caller is willing to deposit.
    pub amount_b_desired: Amount,
    /// Least of asset A the caller accepts to deposit.
    pub amount_a_min: Amount,
    /// Least of asset B the caller accepts to deposit.
    pub amount_b_min: Amount,
}

impl DepositBounds {
    /// Bundles the four deposit parameters.
    pub const fn new(
        amount_a_desired: Amount,
        amount_b_desired: Amount,
        amount_a_min: Amount,
        amount_b_min: Amount,
    ) -> Self {
        Self {
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
        }
    }

    /// Bounds that accept any achievable amounts up to the desired ones.
    pub const fn unbounded(amount_a_desired: Amount, amount_b_desired: Amount) -> Self {
        Self::new(amount_a_desired, amount_b_desired, Amount::ZERO, Amount::ZERO)
    }

    /// Returns the same bounds with the two sides exchanged.
    pub const fn flipped(&self) -> Self {
        Self::new(
            self.amount_b_desired,
            self.amount_a_desired,
            self.amount_b_min,
            self.amount_a_min,
        )
    }
}

/// A computed deposit: the amounts drawn and the liquidity minted for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deposit {
    /// Asset A drawn from the depositor.
    pub amount_a: Amount,
    /// Asset B drawn from the depositor.
    pub amount_b: Amount,
    /// Liquidity tokens minted to the depositor.
    pub minted: Liquidity,
}

/// A computed withdrawal: the liquidity burned and the amounts returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Asset A paid out of the pool.
    pub amount_a: Amount,
    /// Asset B paid out of the pool.
    pub amount_b: Amount,
    /// Liquidity tokens burned from the holder.
    pub burned: Liquidity,
}
