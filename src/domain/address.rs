//! Ledger addresses and asset identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A 32-byte ledger address: a user identity, a token account, a mint, or
/// a program-derived record.
///
/// All 32-byte sequences are valid, so construction is infallible.
///
/// # Examples
///
/// ```
/// use simple_amm::domain::Address;
///
/// let addr = Address::from_bytes([1u8; 32]);
/// assert_eq!(addr.as_bytes(), &[1u8; 32]);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the all-zero address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` for the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    /// Prints the first eight bytes in hex, enough to tell addresses apart
    /// in logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.iter().take(8) {
            write!(f, "{b:02x}")?;
        }
        write!(f, "…")
    }
}

/// Identifier of a fungible asset: the address of its mint on the ledger.
///
/// Asset ids are ordered lexicographically by their bytes, which is the
/// canonical ordering used for [`AssetPair`](super::AssetPair).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AssetId(Address);

impl AssetId {
    /// Creates an asset id from the mint's raw address bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(Address::from_bytes(bytes))
    }

    /// Wraps an existing mint address.
    #[must_use]
    pub const fn from_mint(mint: Address) -> Self {
        Self(mint)
    }

    /// Returns the mint address of the asset.
    #[must_use]
    pub const fn mint(&self) -> Address {
        self.0
    }
}

impl AsRef<[u8]> for AssetId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
