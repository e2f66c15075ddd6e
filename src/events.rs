//! Events emitted by successful operations.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, AssetId, AssetPair, BasisPoints, Liquidity};

/// A record of one committed state transition.
///
/// Events are appended only after an operation has fully succeeded, so the
/// log never mentions a rejected or partially applied operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AmmEvent {
    /// The configuration singleton was created.
    Initialized {
        /// Identity that initialized the program.
        authority: Address,
        /// Swap fee in basis points.
        fee: BasisPoints,
    },
    /// Liquidity was deposited.
    LiquidityAdded {
        /// The pool.
        pair: AssetPair,
        /// Depositor identity.
        provider: Address,
        /// Asset A drawn.
        amount_a: Amount,
        /// Asset B drawn.
        amount_b: Amount,
        /// Liquidity tokens minted.
        minted: Liquidity,
    },
    /// Liquidity was withdrawn.
    LiquidityRemoved {
        /// The pool.
        pair: AssetPair,
        /// Holder identity.
        provider: Address,
        /// Asset A paid out.
        amount_a: Amount,
        /// Asset B paid out.
        amount_b: Amount,
        /// Liquidity tokens burned.
        burned: Liquidity,
    },
    /// A trade was executed.
    Swapped {
        /// The pool.
        pair: AssetPair,
        /// Trader identity.
        trader: Address,
        /// Asset sold.
        input_asset: AssetId,
        /// Amount sold, fee included.
        amount_in: Amount,
        /// Amount bought.
        amount_out: Amount,
        /// Part of `amount_in` retained by the pool as fee.
        fee: Amount,
    },
}

impl AmmEvent {
    /// The pool an event concerns, if any.
    #[must_use]
    pub const fn pair(&self) -> Option<&AssetPair> {
        match self {
            Self::Initialized { .. } => None,
            Self::LiquidityAdded { pair, .. }
            | Self::LiquidityRemoved { pair, .. }
            | Self::Swapped { pair, .. } => Some(pair),
        }
    }
}
