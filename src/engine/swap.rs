//! Constant-product swap pricing.
//!
//! The fee is taken from the input before pricing:
//!
//! 1. `after_fee = amount_in * (10 000 - fee_bps) / 10 000` (floor)
//! 2. `amount_out = reserve_out * after_fee / (reserve_in + after_fee)` (floor)
//! 3. `reserve_in += amount_in` (the fee stays in the pool),
//!    `reserve_out -= amount_out`
//!
//! Both roundings favour the pool, so `reserve_a * reserve_b` never
//! decreases and strictly grows whenever a non-zero fee is charged.
//!
//! # Examples
//!
//! ```
//! use simple_amm::domain::{Amount, BasisPoints, Liquidity, Side};
//! use simple_amm::engine::swap::quote_exact_in;
//! use simple_amm::pool::ReserveSnapshot;
//!
//! let snap = ReserveSnapshot::new(Amount::new(10_000), Amount::new(500), Liquidity::new(2_236));
//! let result = quote_exact_in(snap, Side::A, Amount::new(100), BasisPoints::new(30))
//!     .expect("valid swap");
//! assert_eq!(result.amount_out(), Amount::new(4));
//! assert_eq!(result.fee(), Amount::new(1));
//! ```

use crate::domain::{Amount, BasisPoints, Rounding, Side, SwapResult, SwapSpec};
use crate::error::{AmmError, Result};
use crate::math::{mul_div, mul_div_amount, CheckedArithmetic};
use crate::pool::ReserveSnapshot;

/// The part of `amount_in` that is priced after the fee, rounded down.
///
/// # Errors
///
/// Returns [`AmmError::InvalidFee`] if `fee` exceeds 100%.
pub fn amount_after_fee(amount_in: Amount, fee: BasisPoints) -> Result<Amount> {
    fee.complement()?.apply(amount_in, Rounding::Down)
}

/// Prices a trade that sells exactly `amount_in` into `side_in`.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if `amount_in` is zero, nothing is left
///   after the fee, or the output rounds to zero.
/// - [`AmmError::ZeroReserve`] if either reserve is empty.
/// - [`AmmError::InvalidFee`] if `fee` exceeds 100%.
/// - [`AmmError::Overflow`] on arithmetic overflow.
pub fn quote_exact_in(
    snapshot: ReserveSnapshot,
    side_in: Side,
    amount_in: Amount,
    fee: BasisPoints,
) -> Result<SwapResult> {
    if amount_in.is_zero() {
        return Err(AmmError::InvalidQuantity("swap amount must be non-zero"));
    }
    let (reserve_in, reserve_out) = snapshot.oriented(side_in);
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::ZeroReserve);
    }

    let after_fee = amount_after_fee(amount_in, fee)?;
    if after_fee.is_zero() {
        return Err(AmmError::InvalidQuantity("swap amount after fee is zero"));
    }

    let denominator = reserve_in.widen() + after_fee.widen();
    let amount_out = mul_div_amount(reserve_out, after_fee.widen(), denominator, Rounding::Down)?;
    let fee_amount = amount_in.safe_sub(&after_fee)?;
    SwapResult::new(side_in, amount_in, amount_out, fee_amount)
}

/// Prices a trade that buys exactly `amount_out` from the side opposite
/// `side_in`, returning the smallest input that achieves it.
///
/// The required net input is rounded up, then grossed up by the fee and
/// rounded up again, so the pool is never short-changed.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if `amount_out` is zero.
/// - [`AmmError::ZeroReserve`] if either reserve is empty.
/// - [`AmmError::InsufficientLiquidity`] if `amount_out` would drain the
///   output reserve.
/// - [`AmmError::InvalidFee`] for a 100% (or larger) fee.
/// - [`AmmError::Overflow`] if the required input exceeds `u64`.
pub fn quote_exact_out(
    snapshot: ReserveSnapshot,
    side_in: Side,
    amount_out: Amount,
    fee: BasisPoints,
) -> Result<SwapResult> {
    if amount_out.is_zero() {
        return Err(AmmError::InvalidQuantity("swap amount must be non-zero"));
    }
    let (reserve_in, reserve_out) = snapshot.oriented(side_in);
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    if amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }

    let complement = fee.complement()?;
    if complement.get() == 0 {
        return Err(AmmError::InvalidFee("100% fee makes swap impossible"));
    }

    // reserve_out > amount_out, so the denominator is positive.
    let remaining = reserve_out.widen() - amount_out.widen();
    let net_in = mul_div(reserve_in.widen(), amount_out.widen(), remaining, Rounding::Up)?;
    let gross_in = mul_div(
        net_in,
        BasisPoints::DENOMINATOR,
        u128::from(complement.get()),
        Rounding::Up,
    )?;

    let amount_in =
        Amount::from_wide(gross_in).ok_or(AmmError::Overflow("required input exceeds u64"))?;
    let net_in = Amount::from_wide(net_in).ok_or(AmmError::Overflow("net input exceeds u64"))?;
    let fee_amount = amount_in.safe_sub(&net_in)?;
    SwapResult::new(side_in, amount_in, amount_out, fee_amount)
}

/// Prices a trade described by `spec` and enforces its slippage bound.
///
/// An output exactly at `minimum_amount_out`, or an input exactly at
/// `maximum_amount_in`, is accepted.
///
/// # Errors
///
/// - [`AmmError::SlippageExceeded`] if the bound is violated.
/// - Any error of [`quote_exact_in`] or [`quote_exact_out`].
pub fn quote_swap(
    snapshot: ReserveSnapshot,
    side_in: Side,
    spec: SwapSpec,
    fee: BasisPoints,
) -> Result<SwapResult> {
    match spec {
        SwapSpec::ExactIn {
            amount_in,
            minimum_amount_out,
        } => {
            let result = quote_exact_in(snapshot, side_in, amount_in, fee)?;
            if result.amount_out() < minimum_amount_out {
                return Err(AmmError::SlippageExceeded("swap output below minimum"));
            }
            Ok(result)
        }
        SwapSpec::ExactOut {
            amount_out,
            maximum_amount_in,
        } => {
            let result = quote_exact_out(snapshot, side_in, amount_out, fee)?;
            if result.amount_in() > maximum_amount_in {
                return Err(AmmError::SlippageExceeded("swap input above maximum"));
            }
            Ok(result)
        }
    }
}
