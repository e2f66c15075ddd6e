//! The pool reserve record.

use serde::{Deserialize, Serialize};

use super::ReserveSnapshot;
use crate::domain::{Address, Amount, AssetPair, Liquidity, Side};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Derived addresses of a pool's ledger accounts and their bumps.
///
/// `vault_a` sits at `["pool", a, b]`, `vault_b` at `["pool", b, a]` and
/// the liquidity mint at `["liquidity_token", a, b]`, with `a < b` in
/// canonical order.  Each account is its own authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolAddresses {
    /// Token account holding reserve A.
    pub vault_a: Address,
    /// Bump that derives `vault_a`.
    pub vault_a_bump: u8,
    /// Token account holding reserve B.
    pub vault_b: Address,
    /// Bump that derives `vault_b`.
    pub vault_b_bump: u8,
    /// Mint of the pool's liquidity token.
    pub lp_mint: Address,
    /// Bump that derives `lp_mint`.
    pub lp_mint_bump: u8,
}

impl PoolAddresses {
    /// Returns the vault holding the reserve on `side`, with its bump.
    #[must_use]
    pub const fn vault(&self, side: Side) -> (Address, u8) {
        match side {
            Side::A => (self.vault_a, self.vault_a_bump),
            Side::B => (self.vault_b, self.vault_b_bump),
        }
    }
}

/// Reserve state of one unordered asset pair.
///
/// # Invariants
///
/// - While `lp_supply > 0` both reserves are positive.
/// - Burning the whole supply through a withdrawal empties both reserves.
/// - A swap never decreases `reserve_a * reserve_b`.
///
/// Reserves may outlive the supply when holders burn their tokens directly
/// on the ledger.  Such unclaimed reserves go to the next depositor, who
/// mints against an empty supply.
///
/// Every mutation is staged on a copy by the caller and only committed once
/// all ledger effects of the operation have been validated; the `apply_*`
/// methods therefore either fully succeed or leave `self` untouched.
///
/// # Examples
///
/// ```
/// use simple_amm::domain::{Address, Amount, AssetId, AssetPair, Liquidity};
/// use simple_amm::pool::{PoolAddresses, PoolReserve};
///
/// let pair = AssetPair::new(AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32]))
///     .expect("distinct");
/// let addresses = PoolAddresses {
///     vault_a: Address::from_bytes([3; 32]),
///     vault_a_bump: 255,
///     vault_b: Address::from_bytes([4; 32]),
///     vault_b_bump: 254,
///     lp_mint: Address::from_bytes([5; 32]),
///     lp_mint_bump: 255,
/// };
///
/// let mut pool = PoolReserve::new(pair, addresses);
/// pool.apply_deposit(Amount::new(10_000), Amount::new(500), Liquidity::new(2_236))
///     .expect("deposit");
/// assert_eq!(pool.snapshot().k(), 5_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolReserve {
    pair: AssetPair,
    reserve_a: Amount,
    reserve_b: Amount,
    lp_supply: Liquidity,
    addresses: PoolAddresses,
}

impl PoolReserve {
    /// Creates an empty pool record.
    #[must_use]
    pub const fn new(pair: AssetPair, addresses: PoolAddresses) -> Self {
        Self {
            pair,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            lp_supply: Liquidity::ZERO,
            addresses,
        }
    }

    /// The canonical asset pair.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        &self.pair
    }

    /// Reserve of asset A.
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Reserve of asset B.
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Outstanding liquidity tokens.
    #[must_use]
    pub const fn lp_supply(&self) -> Liquidity {
        self.lp_supply
    }

    /// Derivation nonce of the pool's primary address (`vault_a`).
    #[must_use]
    pub const fn bump(&self) -> u8 {
        self.addresses.vault_a_bump
    }

    /// Addresses of the vaults and liquidity mint.
    #[must_use]
    pub const fn addresses(&self) -> &PoolAddresses {
        &self.addresses
    }

    /// Reads reserves and supply in one step.
    #[must_use]
    pub const fn snapshot(&self) -> ReserveSnapshot {
        ReserveSnapshot::new(self.reserve_a, self.reserve_b, self.lp_supply)
    }

    /// Credits both reserves and records newly minted liquidity.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Overflow`] if a reserve or the supply overflows.
    /// - [`AmmError::InvariantViolation`] if nothing is minted or the result
    ///   would break the supply/reserve coupling.
    pub fn apply_deposit(
        &mut self,
        amount_a: Amount,
        amount_b: Amount,
        minted: Liquidity,
    ) -> Result<(), AmmError> {
        if minted.is_zero() {
            return Err(AmmError::InvariantViolation);
        }
        let reserve_a = self.reserve_a.safe_add(&amount_a)?;
        let reserve_b = self.reserve_b.safe_add(&amount_b)?;
        let lp_supply = self.lp_supply.safe_add(&minted)?;
        self.commit(reserve_a, reserve_b, lp_supply)
    }

    /// Debits both reserves and records burned liquidity.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ReserveUnderflow`] if an amount exceeds its reserve.
    /// - [`AmmError::InsufficientLiquidity`] if `burned` exceeds the supply.
    /// - [`AmmError::InvariantViolation`] if the result would break the
    ///   supply/reserve coupling.
    pub fn apply_withdraw(
        &mut self,
        amount_a: Amount,
        amount_b: Amount,
        burned: Liquidity,
    ) -> Result<(), AmmError> {
        let reserve_a = self
            .reserve_a
            .checked_sub(&amount_a)
            .ok_or(AmmError::ReserveUnderflow("withdrawal exceeds reserve A"))?;
        let reserve_b = self
            .reserve_b
            .checked_sub(&amount_b)
            .ok_or(AmmError::ReserveUnderflow("withdrawal exceeds reserve B"))?;
        let lp_supply = self
            .lp_supply
            .checked_sub(&burned)
            .ok_or(AmmError::InsufficientLiquidity)?;
        if lp_supply.is_zero() && !(reserve_a.is_zero() && reserve_b.is_zero()) {
            return Err(AmmError::InvariantViolation);
        }
        self.commit(reserve_a, reserve_b, lp_supply)
    }

    /// Applies a trade: `amount_in` is credited to `side_in` and
    /// `amount_out` debited from the other side.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ReserveUnderflow`] if `amount_out` exceeds the output
    ///   reserve.
    /// - [`AmmError::Overflow`] if the input reserve overflows.
    /// - [`AmmError::InvariantViolation`] if the trade would lower
    ///   `reserve_a * reserve_b`.
    pub fn apply_swap(
        &mut self,
        side_in: Side,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<(), AmmError> {
        let k_before = self.snapshot().k();
        let (reserve_in, reserve_out) = self.snapshot().oriented(side_in);

        let new_in = reserve_in.safe_add(&amount_in)?;
        let new_out = reserve_out
            .checked_sub(&amount_out)
            .ok_or(AmmError::ReserveUnderflow("swap output exceeds reserve"))?;

        let (reserve_a, reserve_b) = match side_in {
            Side::A => (new_in, new_out),
            Side::B => (new_out, new_in),
        };
        if reserve_a.widen() * reserve_b.widen() < k_before {
            return Err(AmmError::InvariantViolation);
        }
        self.commit(reserve_a, reserve_b, self.lp_supply)
    }

    /// Aligns the recorded supply with the liquidity mint's supply on the
    /// ledger.
    ///
    /// Tokens burned outside the program lower the supply and leave their
    /// share of the reserves to the remaining holders.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvariantViolation`] if the ledger reports more tokens
    /// than the pool ever minted; the record is left untouched.
    pub fn reconcile_supply(&mut self, ledger_supply: Liquidity) -> Result<(), AmmError> {
        if ledger_supply > self.lp_supply {
            return Err(AmmError::InvariantViolation);
        }
        self.lp_supply = ledger_supply;
        Ok(())
    }

    fn commit(
        &mut self,
        reserve_a: Amount,
        reserve_b: Amount,
        lp_supply: Liquidity,
    ) -> Result<(), AmmError> {
        if !lp_supply.is_zero() && (reserve_a.is_zero() || reserve_b.is_zero()) {
            return Err(AmmError::InvariantViolation);
        }
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.lp_supply = lp_supply;
        Ok(())
    }
}
