//! In-memory [`AssetLedger`].
//!
//! Keeps mints and token accounts in hash maps.  Each call validates
//! everything it needs before mutating anything, so a failed call never
//! leaves a partial update behind.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::{Address, Amount, Decimals};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;
use crate::traits::AssetLedger;

/// A mint: who may issue it, its precision and its outstanding supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRecord {
    /// Address allowed to mint new units.
    pub authority: Address,
    /// Decimal places of one whole unit.
    pub decimals: Decimals,
    /// Units in circulation.
    pub supply: Amount,
}

/// A token account: which mint it holds, who owns it and its balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
    /// Mint of the held asset.
    pub mint: Address,
    /// Address allowed to move or burn the balance.
    pub owner: Address,
    /// Units held.
    pub amount: Amount,
}

/// A ledger held entirely in memory.
///
/// # Examples
///
/// ```
/// use simple_amm::domain::{Address, Amount, Decimals};
/// use simple_amm::ledger::InMemoryLedger;
/// use simple_amm::traits::AssetLedger;
///
/// let mint = Address::from_bytes([1; 32]);
/// let issuer = Address::from_bytes([2; 32]);
/// let alice = Address::from_bytes([3; 32]);
/// let account = Address::from_bytes([4; 32]);
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.create_mint(mint, issuer, Decimals::default()).expect("new mint");
/// ledger.create_account(account, mint, alice).expect("new account");
/// ledger.mint(mint, account, Amount::new(1_000), issuer).expect("minted");
/// assert_eq!(ledger.balance_of(&account), Ok(Amount::new(1_000)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    mints: HashMap<Address, MintRecord>,
    accounts: HashMap<Address, TokenAccount>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a mint.
    #[must_use]
    pub fn mint_record(&self, mint: &Address) -> Option<&MintRecord> {
        self.mints.get(mint)
    }

    /// Looks up a token account.
    #[must_use]
    pub fn account(&self, account: &Address) -> Option<&TokenAccount> {
        self.accounts.get(account)
    }

    fn get_mint(&self, mint: &Address) -> Result<&MintRecord> {
        self.mints
            .get(mint)
            .ok_or(AmmError::AccountNotFound("mint does not exist"))
    }

    fn get_account(&self, account: &Address) -> Result<&TokenAccount> {
        self.accounts
            .get(account)
            .ok_or(AmmError::AccountNotFound("token account does not exist"))
    }

    fn set_amount(&mut self, account: &Address, amount: Amount) {
        if let Some(entry) = self.accounts.get_mut(account) {
            entry.amount = amount;
        }
    }

    fn set_supply(&mut self, mint: &Address, supply: Amount) {
        if let Some(entry) = self.mints.get_mut(mint) {
            entry.supply = supply;
        }
    }
}

impl AssetLedger for InMemoryLedger {
    fn create_mint(
        &mut self,
        mint: Address,
        authority: Address,
        decimals: Decimals,
    ) -> Result<()> {
        if self.mints.contains_key(&mint) || self.accounts.contains_key(&mint) {
            return Err(AmmError::AccountExists("mint address already in use"));
        }
        self.mints.insert(
            mint,
            MintRecord {
                authority,
                decimals,
                supply: Amount::ZERO,
            },
        );
        trace!(%mint, %authority, decimals = decimals.get(), "mint created");
        Ok(())
    }

    fn create_account(&mut self, account: Address, mint: Address, owner: Address) -> Result<()> {
        if self.accounts.contains_key(&account) || self.mints.contains_key(&account) {
            return Err(AmmError::AccountExists("token account address already in use"));
        }
        self.get_mint(&mint)?;
        self.accounts.insert(
            account,
            TokenAccount {
                mint,
                owner,
                amount: Amount::ZERO,
            },
        );
        trace!(%account, %mint, %owner, "token account created");
        Ok(())
    }

    fn close_account(&mut self, account: Address, authority: Address) -> Result<()> {
        let entry = self.get_account(&account)?;
        if entry.owner != authority {
            return Err(AmmError::Unauthorized("only the owner may close an account"));
        }
        if !entry.amount.is_zero() {
            return Err(AmmError::InvalidQuantity("cannot close an account with a balance"));
        }
        self.accounts.remove(&account);
        trace!(%account, "token account closed");
        Ok(())
    }

    fn mint(
        &mut self,
        mint: Address,
        destination: Address,
        amount: Amount,
        authority: Address,
    ) -> Result<()> {
        let record = self.get_mint(&mint)?;
        if record.authority != authority {
            return Err(AmmError::Unauthorized("signer is not the mint authority"));
        }
        let dest = self.get_account(&destination)?;
        if dest.mint != mint {
            return Err(AmmError::InvalidAsset("destination holds a different mint"));
        }
        let supply = record.supply.safe_add(&amount)?;
        let balance = dest.amount.safe_add(&amount)?;

        self.set_supply(&mint, supply);
        self.set_amount(&destination, balance);
        trace!(%mint, %destination, %amount, "minted");
        Ok(())
    }

    fn transfer(
        &mut self,
        source: Address,
        destination: Address,
        amount: Amount,
        authority: Address,
    ) -> Result<()> {
        let src = *self.get_account(&source)?;
        let dest = *self.get_account(&destination)?;
        if src.owner != authority {
            return Err(AmmError::Unauthorized("signer does not own the source account"));
        }
        if src.mint != dest.mint {
            return Err(AmmError::InvalidAsset("transfer between different mints"));
        }
        if source == destination {
            return Ok(());
        }
        let debited = src
            .amount
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        let credited = dest.amount.safe_add(&amount)?;

        self.set_amount(&source, debited);
        self.set_amount(&destination, credited);
        trace!(%source, %destination, %amount, "transferred");
        Ok(())
    }

    fn burn(
        &mut self,
        mint: Address,
        account: Address,
        amount: Amount,
        authority: Address,
    ) -> Result<()> {
        let record = *self.get_mint(&mint)?;
        let holder = *self.get_account(&account)?;
        if holder.mint != mint {
            return Err(AmmError::InvalidAsset("account holds a different mint"));
        }
        if holder.owner != authority {
            return Err(AmmError::Unauthorized("signer does not own the account"));
        }
        let balance = holder
            .amount
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        let supply = record.supply.safe_sub(&amount)?;

        self.set_amount(&account, balance);
        self.set_supply(&mint, supply);
        trace!(%mint, %account, %amount, "burned");
        Ok(())
    }

    fn balance_of(&self, account: &Address) -> Result<Amount> {
        self.get_account(account).map(|a| a.amount)
    }

    fn supply(&self, mint: &Address) -> Result<Amount> {
        self.get_mint(mint).map(|m| m.supply)
    }

    fn account_owner(&self, account: &Address) -> Result<Address> {
        self.get_account(account).map(|a| a.owner)
    }

    fn account_mint(&self, account: &Address) -> Result<Address> {
        self.get_account(account).map(|a| a.mint)
    }

    fn mint_authority(&self, mint: &Address) -> Result<Address> {
        self.get_mint(mint).map(|m| m.authority)
    }

    fn account_exists(&self, account: &Address) -> bool {
        self.accounts.contains_key(account)
    }

    fn mint_exists(&self, mint: &Address) -> bool {
        self.mints.contains_key(mint)
    }
}
