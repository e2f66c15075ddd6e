//! Rounded integer division and scaled products.
//!
//! # Convention
//!
//! **Always round against the user** (protocol-favorable):
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal output, minted liquidity | [`Rounding::Down`] |
//! | Required input for an exact-output swap | [`Rounding::Up`] |
//!
//! # Examples
//!
//! ```
//! use simple_amm::domain::Rounding;
//! use simple_amm::math::{div_round, mul_div};
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(mul_div(500, 99, 10_099, Rounding::Down), Ok(4));
//! ```

use crate::domain::{Amount, Rounding};
use crate::error::AmmError;

/// Integer division of `u128` values with explicit rounding direction.
///
/// - [`Rounding::Down`]: floor division.
/// - [`Rounding::Up`]: ceiling division.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q + 1 cannot overflow: a remainder implies denominator > 1.
        Rounding::Up if numerator % denominator != 0 => Some(q + 1),
        Rounding::Up => Some(q),
    }
}

/// Computes `a * b / denominator` in `u128` with explicit rounding.
///
/// # Errors
///
/// - [`AmmError::Overflow`] if `a * b` exceeds `u128`.
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
pub const fn mul_div(
    a: u128,
    b: u128,
    denominator: u128,
    rounding: Rounding,
) -> crate::error::Result<u128> {
    let Some(product) = a.checked_mul(b) else {
        return Err(AmmError::Overflow("mul_div product overflow"));
    };
    match div_round(product, denominator, rounding) {
        Some(q) => Ok(q),
        None => Err(AmmError::DivisionByZero),
    }
}

/// Computes `value * numerator / denominator` and narrows the result back
/// into an [`Amount`].
///
/// # Errors
///
/// - [`AmmError::Overflow`] if the product overflows or the quotient does
///   not fit in a `u64`.
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
pub fn mul_div_amount(
    value: Amount,
    numerator: u128,
    denominator: u128,
    rounding: Rounding,
) -> crate::error::Result<Amount> {
    let q = mul_div(value.widen(), numerator, denominator, rounding)?;
    Amount::from_wide(q).ok_or(AmmError::Overflow("scaled amount exceeds u64"))
}
