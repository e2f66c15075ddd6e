//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use simple_amm::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, AssetId, AssetPair, BasisPoints, Decimals, Deposit, DepositBounds,
    Liquidity, Rounding, Side, SwapResult, SwapSpec, Withdrawal,
};

pub use crate::traits::{AddressDeriver, AssetLedger};

pub use crate::math::CheckedArithmetic;

pub use crate::config::ProgramConfig;

pub use crate::error::{AmmError, Result};

pub use crate::addressing::Blake3Deriver;
pub use crate::events::AmmEvent;
pub use crate::ledger::InMemoryLedger;
pub use crate::pool::ReserveSnapshot;
pub use crate::program::Amm;
pub use crate::registry::AmmState;
