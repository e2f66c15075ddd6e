//! Integer arithmetic for AMM calculations.
//!
//! Everything here works on unsigned integers with explicit rounding:
//! [`CheckedArithmetic`] lifts the domain types' checked operations into
//! [`Result`](crate::error::Result), [`div_round`] and [`mul_div`] form
//! `u128` quotients, and [`isqrt`] computes the floor square root used to
//! size a pool's first liquidity mint.

mod checked;
mod rounding;
mod sqrt;

pub use checked::CheckedArithmetic;
pub use rounding::{div_round, mul_div, mul_div_amount};
pub use sqrt::isqrt;
