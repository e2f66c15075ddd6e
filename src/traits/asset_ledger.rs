//! Fungible-token ledger capability.
//!
//! Mirrors the operations a token program exposes: mints with an authority
//! and a supply, token accounts with an owner and a balance, and the three
//! balance movements (mint, transfer, burn).  Every movement names the
//! authority that signs it; the ledger rejects it unless that authority
//! controls the mint or the source account.

use crate::domain::{Address, Amount, Decimals};
use crate::error::Result;

/// A host ledger of fungible assets.
///
/// # Contract
///
/// - A failed call leaves the ledger unchanged.
/// - Balances and supplies never wrap; overflow is an error.
/// - `authority` must equal the mint authority (for [`mint`](Self::mint))
///   or the account owner (for [`transfer`](Self::transfer),
///   [`burn`](Self::burn) and [`close_account`](Self::close_account)).
pub trait AssetLedger {
    /// Creates a new mint controlled by `authority`.
    ///
    /// # Errors
    ///
    /// [`AmmError::AccountExists`](crate::error::AmmError::AccountExists)
    /// if `mint` is already in use.
    fn create_mint(&mut self, mint: Address, authority: Address, decimals: Decimals)
        -> Result<()>;

    /// Opens an empty token account for `mint`, owned by `owner`.
    ///
    /// # Errors
    ///
    /// - `AccountExists` if `account` is already in use.
    /// - `AccountNotFound` if `mint` does not exist.
    fn create_account(&mut self, account: Address, mint: Address, owner: Address) -> Result<()>;

    /// Closes an empty token account.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if `account` does not exist.
    /// - `Unauthorized` if `authority` is not the owner.
    /// - `InvalidQuantity` if the account still holds a balance.
    fn close_account(&mut self, account: Address, authority: Address) -> Result<()>;

    /// Issues `amount` new units of `mint` into `destination`.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound`, `InvalidAsset` or `Unauthorized` for a bad
    ///   mint, destination or authority.
    /// - `Overflow` if the supply or the balance would overflow.
    fn mint(
        &mut self,
        mint: Address,
        destination: Address,
        amount: Amount,
        authority: Address,
    ) -> Result<()>;

    /// Moves `amount` from `source` to `destination`.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound`, `InvalidAsset` or `Unauthorized` for bad
    ///   accounts or authority.
    /// - `InsufficientBalance` if `source` holds less than `amount`.
    fn transfer(
        &mut self,
        source: Address,
        destination: Address,
        amount: Amount,
        authority: Address,
    ) -> Result<()>;

    /// Destroys `amount` units of `mint` held in `account`.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound`, `InvalidAsset` or `Unauthorized` for bad
    ///   accounts or authority.
    /// - `InsufficientBalance` if `account` holds less than `amount`.
    fn burn(
        &mut self,
        mint: Address,
        account: Address,
        amount: Amount,
        authority: Address,
    ) -> Result<()>;

    /// Balance of a token account.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if `account` does not exist.
    fn balance_of(&self, account: &Address) -> Result<Amount>;

    /// Outstanding supply of a mint.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if `mint` does not exist.
    fn supply(&self, mint: &Address) -> Result<Amount>;

    /// Owner of a token account.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if `account` does not exist.
    fn account_owner(&self, account: &Address) -> Result<Address>;

    /// Mint whose units a token account holds.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if `account` does not exist.
    fn account_mint(&self, account: &Address) -> Result<Address>;

    /// Authority allowed to issue units of `mint`.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if `mint` does not exist.
    fn mint_authority(&self, mint: &Address) -> Result<Address>;

    /// Returns `true` if a token account exists at `account`.
    fn account_exists(&self, account: &Address) -> bool;

    /// Returns `true` if a mint exists at `mint`.
    fn mint_exists(&self, mint: &Address) -> bool;
}
