//! Pure pricing engines.
//!
//! Both engines take a [`ReserveSnapshot`](crate::pool::ReserveSnapshot)
//! by value and return what an operation *would* do; they never touch a
//! pool record or the ledger.  The [`Amm`](crate::program::Amm) program
//! applies their results.
//!
//! - [`liquidity`]: deposit sizing, liquidity minting and withdrawal
//!   payouts.
//! - [`swap`]: constant-product trade pricing with fees.

pub mod liquidity;
pub mod swap;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;
