//! Fundamental domain value types used throughout the AMM library.
//!
//! Addresses and asset ids, amounts and liquidity shares, fee rates, the
//! canonical asset pair, swap specifications and the outcomes of deposits,
//! withdrawals and swaps.  Types with invariants expose validated
//! constructors.

mod address;
mod amount;
mod asset_pair;
mod basis_points;
mod decimals;
mod liquidity;
mod liquidity_change;
mod rounding;
mod swap_result;
mod swap_spec;

pub use address::{Address, AssetId};
pub use amount::Amount;
pub use asset_pair::{AssetPair, Side};
pub use basis_points::BasisPoints;
pub use decimals::Decimals;
pub use liquidity::Liquidity;
pub use liquidity_change::{Deposit, DepositBounds, Withdrawal};
pub use rounding::Rounding;
pub use swap_result::SwapResult;
pub use swap_spec::SwapSpec;
