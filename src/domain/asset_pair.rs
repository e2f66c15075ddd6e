//! Unordered pair of distinct assets with a canonical ordering.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::AssetId;
use crate::error::AmmError;

/// Which side of a canonical [`AssetPair`] an asset sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The asset with the lower id (`reserve_a`).
    A,
    /// The asset with the higher id (`reserve_b`).
    B,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// A pool's identity: two distinct assets, canonically sorted by id.
///
/// `(X, Y)` and `(Y, X)` build the same pair, so a pool is keyed by the
/// unordered pair and there is exactly one reserve record per economic
/// pool.
///
/// # Examples
///
/// ```
/// use simple_amm::domain::{AssetId, AssetPair};
///
/// let x = AssetId::from_bytes([1u8; 32]);
/// let y = AssetId::from_bytes([2u8; 32]);
///
/// let pair = AssetPair::new(y, x).expect("distinct assets");
/// assert_eq!(pair.asset_a(), x);
/// assert_eq!(pair.asset_b(), y);
/// assert_eq!(pair, AssetPair::new(x, y).expect("distinct assets"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates a canonically ordered pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if both ids are equal.
    pub fn new(x: AssetId, y: AssetId) -> Result<Self, AmmError> {
        if x == y {
            return Err(AmmError::InvalidAsset("pair requires two distinct assets"));
        }
        let (asset_a, asset_b) = if x < y { (x, y) } else { (y, x) };
        Ok(Self { asset_a, asset_b })
    }

    /// The asset with the lower id.
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    /// The asset with the higher id.
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    /// Borrows both assets in canonical order.
    #[must_use]
    pub const fn assets(&self) -> (&AssetId, &AssetId) {
        (&self.asset_a, &self.asset_b)
    }

    /// Returns the side `asset` occupies.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `asset` is not in the pair.
    pub fn side_of(&self, asset: &AssetId) -> Result<Side, AmmError> {
        if *asset == self.asset_a {
            Ok(Side::A)
        } else if *asset == self.asset_b {
            Ok(Side::B)
        } else {
            Err(AmmError::InvalidAsset("asset is not part of this pair"))
        }
    }

    /// Returns the asset on `side`.
    #[must_use]
    pub const fn asset(&self, side: Side) -> AssetId {
        match side {
            Side::A => self.asset_a,
            Side::B => self.asset_b,
        }
    }

    /// Returns the counterpart of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `asset` is not in the pair.
    pub fn other(&self, asset: &AssetId) -> Result<AssetId, AmmError> {
        Ok(self.asset(self.side_of(asset)?.other()))
    }

    /// Reorders a value pair given in the caller's `(x, y)` order into
    /// canonical `(a, b)` order.  Applying it twice restores the original.
    #[must_use]
    pub fn orient<T>(&self, x: &AssetId, values: (T, T)) -> (T, T) {
        if *x == self.asset_a {
            values
        } else {
            (values.1, values.0)
        }
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.asset_a, self.asset_b)
    }
}
