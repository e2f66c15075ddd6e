//! Liquidity issuance: how much to draw on deposit, how many liquidity
//! tokens to mint, and what a burn pays out.
//!
//! # Deposit rule
//!
//! An empty pool accepts the desired amounts as given and mints
//! `floor(sqrt(amount_a * amount_b))`.  A funded pool keeps its reserve
//! ratio: it draws all of the desired A when the matching B fits within
//! the desired B, otherwise all of the desired B and the matching A.  The
//! minted amount is the smaller of the two proportional shares, so
//! rounding can never hand a depositor more than their contribution.
//!
//! # Examples
//!
//! ```
//! use simple_amm::domain::{Amount, DepositBounds, Liquidity};
//! use simple_amm::engine::liquidity::plan_deposit;
//! use simple_amm::pool::ReserveSnapshot;
//!
//! let bounds = DepositBounds::new(
//!     Amount::new(10_000),
//!     Amount::new(500),
//!     Amount::new(10_000),
//!     Amount::new(500),
//! );
//! let deposit = plan_deposit(ReserveSnapshot::EMPTY, &bounds).expect("valid deposit");
//! assert_eq!(deposit.minted, Liquidity::new(2_236));
//! ```

use crate::domain::{Amount, Deposit, DepositBounds, Liquidity, Rounding, Withdrawal};
use crate::error::{AmmError, Result};
use crate::math::{isqrt, mul_div};
use crate::pool::ReserveSnapshot;

/// Returns the amount of the other asset that matches `amount` at the
/// current reserve ratio: `amount * reserve_to / reserve_from`, rounded
/// down.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if `amount` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
/// - [`AmmError::Overflow`] if the quote does not fit in an [`Amount`].
///
/// # Examples
///
/// ```
/// use simple_amm::domain::Amount;
/// use simple_amm::engine::liquidity::quote;
///
/// let b = quote(Amount::new(1_000), Amount::new(10_000), Amount::new(500));
/// assert_eq!(b, Ok(Amount::new(50)));
/// ```
pub fn quote(amount: Amount, reserve_from: Amount, reserve_to: Amount) -> Result<Amount> {
    let wide = quote_wide(amount, reserve_from, reserve_to)?;
    Amount::from_wide(wide).ok_or(AmmError::Overflow("quote exceeds u64"))
}

fn quote_wide(amount: Amount, reserve_from: Amount, reserve_to: Amount) -> Result<u128> {
    if amount.is_zero() {
        return Err(AmmError::InvalidQuantity("quote amount must be non-zero"));
    }
    if reserve_from.is_zero() || reserve_to.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    mul_div(
        amount.widen(),
        reserve_to.widen(),
        reserve_from.widen(),
        Rounding::Down,
    )
}

/// Chooses the `(amount_a, amount_b)` actually drawn for a deposit and
/// checks them against the caller's minimums.
///
/// # Errors
///
/// - [`AmmError::SlippageExceeded`] if either chosen amount is below its
///   minimum.
/// - Any error of [`quote`] for a funded pool.
pub fn deposit_amounts(snapshot: ReserveSnapshot, bounds: &DepositBounds) -> Result<(Amount, Amount)> {
    let (amount_a, amount_b) = if snapshot.is_empty() {
        (bounds.amount_a_desired, bounds.amount_b_desired)
    } else {
        let b_optimal = quote_wide(bounds.amount_a_desired, snapshot.reserve_a, snapshot.reserve_b)?;
        if b_optimal <= bounds.amount_b_desired.widen() {
            // Bounded by amount_b_desired, so it fits.
            let b_optimal =
                Amount::from_wide(b_optimal).ok_or(AmmError::Overflow("quote exceeds u64"))?;
            (bounds.amount_a_desired, b_optimal)
        } else {
            let a_optimal = quote(bounds.amount_b_desired, snapshot.reserve_b, snapshot.reserve_a)?;
            (a_optimal, bounds.amount_b_desired)
        }
    };

    if amount_a < bounds.amount_a_min {
        return Err(AmmError::SlippageExceeded("deposit of asset A below minimum"));
    }
    if amount_b < bounds.amount_b_min {
        return Err(AmmError::SlippageExceeded("deposit of asset B below minimum"));
    }
    Ok((amount_a, amount_b))
}

/// Liquidity tokens owed for depositing `(amount_a, amount_b)`.
///
/// # Errors
///
/// - [`AmmError::ZeroLiquidityMinted`] if the result rounds to zero.
/// - [`AmmError::InsufficientLiquidity`] if the pool has supply but an
///   empty reserve.
/// - [`AmmError::Overflow`] on arithmetic overflow.
pub fn liquidity_to_mint(
    snapshot: ReserveSnapshot,
    amount_a: Amount,
    amount_b: Amount,
) -> Result<Liquidity> {
    let minted = if snapshot.is_empty() {
        isqrt(amount_a.widen() * amount_b.widen())
    } else {
        if snapshot.reserve_a.is_zero() || snapshot.reserve_b.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        let supply = snapshot.lp_supply.widen();
        let share_a = mul_div(amount_a.widen(), supply, snapshot.reserve_a.widen(), Rounding::Down)?;
        let share_b = mul_div(amount_b.widen(), supply, snapshot.reserve_b.widen(), Rounding::Down)?;
        share_a.min(share_b)
    };

    if minted == 0 {
        return Err(AmmError::ZeroLiquidityMinted);
    }
    u64::try_from(minted)
        .map(Liquidity::new)
        .map_err(|_| AmmError::Overflow("minted liquidity exceeds u64"))
}

/// Sizes a deposit and the liquidity it mints.
///
/// # Errors
///
/// Propagates the errors of [`deposit_amounts`] and [`liquidity_to_mint`].
pub fn plan_deposit(snapshot: ReserveSnapshot, bounds: &DepositBounds) -> Result<Deposit> {
    let (amount_a, amount_b) = deposit_amounts(snapshot, bounds)?;
    let minted = liquidity_to_mint(snapshot, amount_a, amount_b)?;
    Ok(Deposit {
        amount_a,
        amount_b,
        minted,
    })
}

/// Computes the payout for burning `burn` liquidity tokens out of a
/// holder balance of `held`: `reserve * burn / lp_supply` of each asset,
/// rounded down.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if `burn` is zero.
/// - [`AmmError::InsufficientLiquidity`] if `burn` exceeds `held` or the
///   pool supply, or if either payout rounds to zero.
/// - [`AmmError::SlippageExceeded`] if a payout is below its minimum.
pub fn plan_withdrawal(
    snapshot: ReserveSnapshot,
    burn: Liquidity,
    held: Liquidity,
    amount_a_min: Amount,
    amount_b_min: Amount,
) -> Result<Withdrawal> {
    if burn.is_zero() {
        return Err(AmmError::InvalidQuantity("burn amount must be non-zero"));
    }
    if burn > held || burn > snapshot.lp_supply {
        return Err(AmmError::InsufficientLiquidity);
    }

    let supply = snapshot.lp_supply.widen();
    let amount_a = payout(snapshot.reserve_a, burn, supply)?;
    let amount_b = payout(snapshot.reserve_b, burn, supply)?;
    if amount_a.is_zero() || amount_b.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }

    if amount_a < amount_a_min {
        return Err(AmmError::SlippageExceeded("withdrawal of asset A below minimum"));
    }
    if amount_b < amount_b_min {
        return Err(AmmError::SlippageExceeded("withdrawal of asset B below minimum"));
    }
    Ok(Withdrawal {
        amount_a,
        amount_b,
        burned: burn,
    })
}

fn payout(reserve: Amount, burn: Liquidity, supply: u128) -> Result<Amount> {
    let wide = mul_div(reserve.widen(), burn.widen(), supply, Rounding::Down)?;
    // burn <= supply keeps this at or below the reserve.
    Amount::from_wide(wide).ok_or(AmmError::Overflow("withdrawal exceeds u64"))
}
