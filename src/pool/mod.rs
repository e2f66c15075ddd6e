//! Per-pair reserve records.
//!
//! A [`PoolReserve`] holds the two reserve balances of one unordered asset
//! pair together with the outstanding liquidity-token supply and the
//! addresses of the pool's vaults and liquidity mint.  Its `apply_*`
//! methods are the only writers of reserve state; each one re-checks the
//! record's invariants before committing.
//!
//! Read paths take a [`ReserveSnapshot`] once and derive every quantity of
//! an operation from it.

mod reserve;
mod snapshot;

pub use reserve::{PoolAddresses, PoolReserve};
pub use snapshot::ReserveSnapshot;
