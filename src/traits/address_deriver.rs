//! Deterministic address derivation.

use crate::domain::Address;
use crate::error::{AmmError, Result};

/// Seed tag of the associated token account of `(owner, mint)`.
pub const ASSOCIATED_SEED: &[u8] = b"associated";

/// Maps seed tuples to program-owned addresses.
///
/// [`create_address`](Self::create_address) is the primitive: it hashes
/// `seeds` and `bump` into a candidate and rejects candidates that some
/// external key could control.  [`derive`](Self::derive) searches bumps
/// from 255 downwards and returns the first viable one, so the pair it
/// returns is canonical for the seeds.  Presenting the same seeds and bump
/// to `create_address` later proves authority over the address.
pub trait AddressDeriver {
    /// Builds the address for `seeds` with an explicit `bump`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidBump`] if `bump` yields a non-viable candidate.
    fn create_address(&self, seeds: &[&[u8]], bump: u8) -> Result<Address>;

    /// Finds the canonical `(address, bump)` for `seeds`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidBump`] if no bump in `0..=255` is viable.
    fn derive(&self, seeds: &[&[u8]]) -> Result<(Address, u8)> {
        for bump in (0..=u8::MAX).rev() {
            if let Ok(address) = self.create_address(seeds, bump) {
                return Ok((address, bump));
            }
        }
        Err(AmmError::InvalidBump("no viable bump for seeds"))
    }

    /// The associated token account `owner` holds for `mint`.
    ///
    /// # Errors
    ///
    /// Propagates [`derive`](Self::derive) failures.
    fn associated_account(&self, owner: &Address, mint: &Address) -> Result<Address> {
        self.derive(&[ASSOCIATED_SEED, owner.as_ref(), mint.as_ref()])
            .map(|(address, _)| address)
    }
}
