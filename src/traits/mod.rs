//! Capabilities the engine consumes from its host.
//!
//! The engine never stores balances or derives addresses itself.  It calls
//! an [`AssetLedger`] for every balance movement and an [`AddressDeriver`]
//! for every deterministic address, so it can run against any host that
//! provides the two.  In-memory implementations live in
//! [`ledger`](crate::ledger) and [`addressing`](crate::addressing).

mod address_deriver;
mod asset_ledger;

pub use address_deriver::AddressDeriver;
pub use asset_ledger::AssetLedger;
