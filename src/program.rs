//! The AMM program: the operation surface callers invoke.
//!
//! [`Amm`] owns the configuration registry, one [`PoolReserve`] per
//! unordered asset pair, the asset ledger and the address deriver.  Every
//! state-changing operation follows the same shape:
//!
//! 1. copy the pool record, take its liquidity supply from the ledger and
//!    read it once into a [`ReserveSnapshot`];
//! 2. price the operation with the pure [`engine`](crate::engine);
//! 3. stage the new pool record and the ledger effects on copies;
//! 4. commit both together, append an [`AmmEvent`] and log it.
//!
//! Any error in steps 1–3 returns before step 4, so a failed operation
//! leaves the registry, the pools and the ledger exactly as they were.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::addressing::{amm_state_seeds, lp_mint_seeds, vault_seeds, Blake3Deriver};
use crate::config::ProgramConfig;
use crate::domain::{
    Address, Amount, AssetId, AssetPair, BasisPoints, Deposit, DepositBounds, Liquidity, Side,
    SwapResult, SwapSpec, Withdrawal,
};
use crate::engine::{liquidity, swap};
use crate::error::{AmmError, Result};
use crate::events::AmmEvent;
use crate::ledger::InMemoryLedger;
use crate::pool::{PoolAddresses, PoolReserve, ReserveSnapshot};
use crate::registry::{AmmRegistry, AmmState};
use crate::traits::{AddressDeriver, AssetLedger};

/// A constant-product AMM over a host ledger.
///
/// The ledger is staged by cloning it before an operation's balance
/// movements and swapping the copy in only once all of them succeeded.
/// Every operation therefore pays one `L::clone`.  [`InMemoryLedger`]
/// copies its maps, which is fine for tests and small states; a host with
/// a large ledger should implement [`AssetLedger`] on a cheap handle such
/// as a copy-on-write snapshot or a transaction over its store.
///
/// # Examples
///
/// ```
/// use simple_amm::config::ProgramConfig;
/// use simple_amm::domain::Address;
/// use simple_amm::program::Amm;
///
/// let mut amm = Amm::in_memory(ProgramConfig::default()).expect("valid config");
/// let alice = Address::from_bytes([1; 32]);
///
/// let state = amm.initialize_amm(alice, 30).expect("first initialization");
/// assert_eq!(state.authority, alice);
/// assert!(amm.initialize_amm(alice, 30).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Amm<L, D> {
    config: ProgramConfig,
    registry: AmmRegistry,
    pools: HashMap<AssetPair, PoolReserve>,
    ledger: L,
    deriver: D,
    events: Vec<AmmEvent>,
}

impl Amm<InMemoryLedger, Blake3Deriver> {
    /// Creates a program over an empty [`InMemoryLedger`], deriving
    /// addresses with a [`Blake3Deriver`] scoped to the configured program
    /// id.
    ///
    /// # Errors
    ///
    /// Propagates [`ProgramConfig::validate`] failures.
    pub fn in_memory(config: ProgramConfig) -> Result<Self> {
        let deriver = Blake3Deriver::new(config.program_id());
        Self::new(config, InMemoryLedger::new(), deriver)
    }
}

impl<L, D> Amm<L, D>
where
    L: AssetLedger + Clone,
    D: AddressDeriver,
{
    /// Creates a program over `ledger`.
    ///
    /// # Errors
    ///
    /// Propagates [`ProgramConfig::validate`] failures.
    pub fn new(config: ProgramConfig, ledger: L, deriver: D) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: AmmRegistry::new(),
            pools: HashMap::new(),
            ledger,
            deriver,
            events: Vec::new(),
        })
    }

    // -- Accessors ----------------------------------------------------------

    /// Deployment parameters.
    #[must_use]
    pub const fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// The configuration singleton.
    ///
    /// # Errors
    ///
    /// [`AmmError::NotInitialized`] before [`initialize_amm`](Self::initialize_amm).
    pub fn state(&self) -> Result<&AmmState> {
        self.registry.state()
    }

    /// The host ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the host ledger, for funding and account setup
    /// outside the program.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The address deriver.
    #[must_use]
    pub const fn deriver(&self) -> &D {
        &self.deriver
    }

    /// The pool record of `{x, y}` as of its last committed operation.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `x == y`.
    /// - [`AmmError::PoolNotFound`] if nobody has deposited into the pair.
    pub fn pool(&self, x: AssetId, y: AssetId) -> Result<&PoolReserve> {
        let pair = AssetPair::new(x, y)?;
        self.pools.get(&pair).ok_or(AmmError::PoolNotFound)
    }

    /// Reserves and liquidity supply of `{x, y}`, in canonical `(a, b)`
    /// order.  The supply is read from the liquidity mint on the ledger.
    ///
    /// # Errors
    ///
    /// - Same as [`pool`](Self::pool).
    /// - [`AmmError::InvariantViolation`] if the ledger reports more
    ///   liquidity tokens than the pool minted.
    pub fn get_reserves(&self, x: AssetId, y: AssetId) -> Result<ReserveSnapshot> {
        self.reconciled(self.pool(x, y)?).map(|pool| pool.snapshot())
    }

    /// Liquidity tokens `owner` holds in `{x, y}`; zero when the pool or
    /// the position does not exist.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAsset`] if `x == y`; address derivation failures.
    pub fn position_balance(&self, owner: &Address, x: AssetId, y: AssetId) -> Result<Liquidity> {
        let pair = AssetPair::new(x, y)?;
        let Some(pool) = self.pools.get(&pair) else {
            return Ok(Liquidity::ZERO);
        };
        let position = self
            .deriver
            .associated_account(owner, &pool.addresses().lp_mint)?;
        if !self.ledger.account_exists(&position) {
            return Ok(Liquidity::ZERO);
        }
        self.ledger
            .balance_of(&position)
            .map(|amount| Liquidity::new(amount.get()))
    }

    /// Canonical address and bump of the liquidity mint of `{x, y}`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAsset`] if `x == y`; address derivation failures.
    pub fn lp_mint_address(&self, x: AssetId, y: AssetId) -> Result<(Address, u8)> {
        let pair = AssetPair::new(x, y)?;
        self.deriver.derive(&lp_mint_seeds(&pair))
    }

    /// The associated token account `owner` holds for `mint`.
    ///
    /// # Errors
    ///
    /// Address derivation failures.
    pub fn associated_account(&self, owner: &Address, mint: &Address) -> Result<Address> {
        self.deriver.associated_account(owner, mint)
    }

    /// Drains the events of all operations committed since the last call.
    pub fn take_events(&mut self) -> Vec<AmmEvent> {
        core::mem::take(&mut self.events)
    }

    // -- Configuration ------------------------------------------------------

    /// Creates the configuration singleton with `caller` as authority.
    ///
    /// # Errors
    ///
    /// - [`AmmError::AlreadyInitialized`] on any call after the first; the
    ///   stored configuration is unchanged.
    /// - [`AmmError::InvalidFee`] if `fee_basis_points` exceeds 10 000 or
    ///   the configured maximum.
    pub fn initialize_amm(&mut self, caller: Address, fee_basis_points: u16) -> Result<AmmState> {
        let result = self.try_initialize(caller, BasisPoints::new(fee_basis_points));
        rejected("initialize_amm", result)
    }

    fn try_initialize(&mut self, caller: Address, fee: BasisPoints) -> Result<AmmState> {
        let (address, bump) = self.deriver.derive(&amm_state_seeds())?;
        let state = *self
            .registry
            .initialize(caller, fee, self.config.max_fee(), address, bump)?;

        info!(authority = %state.authority, fee = %state.fee, "AMM initialized");
        self.events.push(AmmEvent::Initialized {
            authority: state.authority,
            fee: state.fee,
        });
        Ok(state)
    }

    // -- Liquidity ----------------------------------------------------------

    /// Deposits into the `{asset_x, asset_y}` pool, creating the pool, its
    /// vaults, its liquidity mint and the provider's position on first use.
    ///
    /// `bounds` are given in the caller's `(x, y)` order.  `lp_bump` must
    /// derive the pool's liquidity mint.  The returned [`Deposit`] is in
    /// canonical `(a, b)` order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before `initialize_amm`.
    /// - [`AmmError::InvalidAsset`] if `asset_x == asset_y`.
    /// - [`AmmError::InvalidBump`] if `lp_bump` does not derive the mint.
    /// - [`AmmError::SlippageExceeded`], [`AmmError::ZeroLiquidityMinted`],
    ///   [`AmmError::InvalidQuantity`] from the issuance rule.
    /// - [`AmmError::InsufficientBalance`], [`AmmError::AccountNotFound`]
    ///   from the ledger.
    /// - Arithmetic errors.
    pub fn add_liquidity(
        &mut self,
        provider: Address,
        asset_x: AssetId,
        asset_y: AssetId,
        lp_bump: u8,
        bounds: DepositBounds,
    ) -> Result<Deposit> {
        let result = self.try_add_liquidity(provider, asset_x, asset_y, lp_bump, bounds);
        rejected("add_liquidity", result)
    }

    fn try_add_liquidity(
        &mut self,
        provider: Address,
        asset_x: AssetId,
        asset_y: AssetId,
        lp_bump: u8,
        bounds: DepositBounds,
    ) -> Result<Deposit> {
        self.registry.state()?;
        let pair = AssetPair::new(asset_x, asset_y)?;
        let bounds = if asset_x == pair.asset_a() {
            bounds
        } else {
            bounds.flipped()
        };

        let lp_mint = self.deriver.create_address(&lp_mint_seeds(&pair), lp_bump)?;
        let bootstrap = !self.pools.contains_key(&pair);
        let pool = match self.pools.get(&pair) {
            Some(pool) => pool.clone(),
            None => PoolReserve::new(pair, self.derive_pool_addresses(&pair)?),
        };
        let addresses = *pool.addresses();
        if lp_mint != addresses.lp_mint || lp_bump != addresses.lp_mint_bump {
            return Err(AmmError::InvalidBump("bump does not derive the liquidity mint"));
        }

        let source_a = self.deriver.associated_account(&provider, &pair.asset_a().mint())?;
        let source_b = self.deriver.associated_account(&provider, &pair.asset_b().mint())?;
        let position = self.deriver.associated_account(&provider, &addresses.lp_mint)?;
        if bootstrap {
            self.check_pool_accounts(&pair, &addresses)?;
        }
        check_account(&self.ledger, &position, &addresses.lp_mint, &provider)?;

        let mut staged = self.reconciled(&pool)?;
        let deposit = liquidity::plan_deposit(staged.snapshot(), &bounds)?;
        staged.apply_deposit(deposit.amount_a, deposit.amount_b, deposit.minted)?;
        let lp_decimals = self.config.lp_decimals();

        let ledger = stage(&self.ledger, |ledger| {
            if bootstrap {
                open_if_absent(ledger, addresses.vault_a, pair.asset_a().mint(), addresses.vault_a)?;
                open_if_absent(ledger, addresses.vault_b, pair.asset_b().mint(), addresses.vault_b)?;
                if !ledger.mint_exists(&addresses.lp_mint) {
                    ledger.create_mint(addresses.lp_mint, addresses.lp_mint, lp_decimals)?;
                }
            }
            ledger.transfer(source_a, addresses.vault_a, deposit.amount_a, provider)?;
            ledger.transfer(source_b, addresses.vault_b, deposit.amount_b, provider)?;
            open_if_absent(ledger, position, addresses.lp_mint, provider)?;
            ledger.mint(
                addresses.lp_mint,
                position,
                Amount::new(deposit.minted.get()),
                addresses.lp_mint,
            )
        })?;

        self.ledger = ledger;
        self.pools.insert(pair, staged);
        info!(
            %pair,
            %provider,
            amount_a = %deposit.amount_a,
            amount_b = %deposit.amount_b,
            minted = %deposit.minted,
            "liquidity added"
        );
        self.events.push(AmmEvent::LiquidityAdded {
            pair,
            provider,
            amount_a: deposit.amount_a,
            amount_b: deposit.amount_b,
            minted: deposit.minted,
        });
        Ok(deposit)
    }

    /// Burns `burn` of the provider's liquidity tokens in `{asset_x,
    /// asset_y}` and pays out the proportional share of both reserves.
    ///
    /// The minimums are given in the caller's `(x, y)` order; the returned
    /// [`Withdrawal`] is in canonical `(a, b)` order.  A position left
    /// empty is closed.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if the pool does not exist.
    /// - [`AmmError::InsufficientLiquidity`] if the provider holds less
    ///   than `burn`, or a payout rounds to zero.
    /// - [`AmmError::InvalidQuantity`] if `burn` is zero.
    /// - [`AmmError::SlippageExceeded`] if a payout is below its minimum.
    /// - Ledger and arithmetic errors.
    pub fn remove_liquidity(
        &mut self,
        provider: Address,
        asset_x: AssetId,
        asset_y: AssetId,
        burn: Liquidity,
        amount_x_min: Amount,
        amount_y_min: Amount,
    ) -> Result<Withdrawal> {
        let result =
            self.try_remove_liquidity(provider, asset_x, asset_y, burn, amount_x_min, amount_y_min);
        rejected("remove_liquidity", result)
    }

    fn try_remove_liquidity(
        &mut self,
        provider: Address,
        asset_x: AssetId,
        asset_y: AssetId,
        burn: Liquidity,
        amount_x_min: Amount,
        amount_y_min: Amount,
    ) -> Result<Withdrawal> {
        self.registry.state()?;
        let pair = AssetPair::new(asset_x, asset_y)?;
        let (amount_a_min, amount_b_min) = pair.orient(&asset_x, (amount_x_min, amount_y_min));
        let mut staged = self.reconciled(self.pools.get(&pair).ok_or(AmmError::PoolNotFound)?)?;
        let addresses = *staged.addresses();

        let position = self.deriver.associated_account(&provider, &addresses.lp_mint)?;
        let held = if self.ledger.account_exists(&position) {
            Liquidity::new(self.ledger.balance_of(&position)?.get())
        } else {
            Liquidity::ZERO
        };

        let withdrawal =
            liquidity::plan_withdrawal(staged.snapshot(), burn, held, amount_a_min, amount_b_min)?;
        staged.apply_withdraw(withdrawal.amount_a, withdrawal.amount_b, withdrawal.burned)?;

        let vault_a = self.vault_signer(&pair, &addresses, Side::A)?;
        let vault_b = self.vault_signer(&pair, &addresses, Side::B)?;
        let dest_a = self.deriver.associated_account(&provider, &pair.asset_a().mint())?;
        let dest_b = self.deriver.associated_account(&provider, &pair.asset_b().mint())?;
        check_account(&self.ledger, &dest_a, &pair.asset_a().mint(), &provider)?;
        check_account(&self.ledger, &dest_b, &pair.asset_b().mint(), &provider)?;
        let position_emptied = withdrawal.burned == held;

        let ledger = stage(&self.ledger, |ledger| {
            ledger.burn(
                addresses.lp_mint,
                position,
                Amount::new(withdrawal.burned.get()),
                provider,
            )?;
            ledger.transfer(vault_a, dest_a, withdrawal.amount_a, vault_a)?;
            ledger.transfer(vault_b, dest_b, withdrawal.amount_b, vault_b)?;
            if position_emptied {
                ledger.close_account(position, provider)?;
            }
            Ok(())
        })?;

        self.ledger = ledger;
        self.pools.insert(pair, staged);
        info!(
            %pair,
            %provider,
            amount_a = %withdrawal.amount_a,
            amount_b = %withdrawal.amount_b,
            burned = %withdrawal.burned,
            "liquidity removed"
        );
        self.events.push(AmmEvent::LiquidityRemoved {
            pair,
            provider,
            amount_a: withdrawal.amount_a,
            amount_b: withdrawal.amount_b,
            burned: withdrawal.burned,
        });
        Ok(withdrawal)
    }

    // -- Swaps --------------------------------------------------------------

    /// Sells exactly `amount_in` of `input_asset` for `output_asset`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`], [`AmmError::PoolNotFound`],
    ///   [`AmmError::InvalidAsset`] for a bad context.
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `minimum_amount_out`.
    /// - Pricing, ledger and arithmetic errors.
    pub fn swap(
        &mut self,
        trader: Address,
        input_asset: AssetId,
        output_asset: AssetId,
        amount_in: Amount,
        minimum_amount_out: Amount,
    ) -> Result<SwapResult> {
        let result = SwapSpec::exact_in(amount_in, minimum_amount_out)
            .and_then(|spec| self.try_swap(trader, input_asset, output_asset, spec));
        rejected("swap", result)
    }

    /// Buys exactly `amount_out` of `output_asset`, paying at most
    /// `maximum_amount_in` of `input_asset`.
    ///
    /// # Errors
    ///
    /// Same as [`swap`](Self::swap), with [`AmmError::SlippageExceeded`]
    /// when the required input is above `maximum_amount_in`.
    pub fn swap_exact_out(
        &mut self,
        trader: Address,
        input_asset: AssetId,
        output_asset: AssetId,
        amount_out: Amount,
        maximum_amount_in: Amount,
    ) -> Result<SwapResult> {
        let result = SwapSpec::exact_out(amount_out, maximum_amount_in)
            .and_then(|spec| self.try_swap(trader, input_asset, output_asset, spec));
        rejected("swap_exact_out", result)
    }

    /// Prices a swap against the current reserves without executing it.
    ///
    /// # Errors
    ///
    /// Same as [`swap`](Self::swap), minus ledger errors.
    pub fn quote_swap(
        &self,
        input_asset: AssetId,
        output_asset: AssetId,
        spec: SwapSpec,
    ) -> Result<SwapResult> {
        let fee = self.registry.state()?.fee;
        let pair = AssetPair::new(input_asset, output_asset)?;
        let pool = self.reconciled(self.pools.get(&pair).ok_or(AmmError::PoolNotFound)?)?;
        swap::quote_swap(pool.snapshot(), pair.side_of(&input_asset)?, spec, fee)
    }

    fn try_swap(
        &mut self,
        trader: Address,
        input_asset: AssetId,
        output_asset: AssetId,
        spec: SwapSpec,
    ) -> Result<SwapResult> {
        let fee = self.registry.state()?.fee;
        let pair = AssetPair::new(input_asset, output_asset)?;
        let side_in = pair.side_of(&input_asset)?;
        let mut staged = self.reconciled(self.pools.get(&pair).ok_or(AmmError::PoolNotFound)?)?;
        let addresses = *staged.addresses();

        let result = swap::quote_swap(staged.snapshot(), side_in, spec, fee)?;
        staged.apply_swap(side_in, result.amount_in(), result.amount_out())?;

        let (vault_in, _) = addresses.vault(side_in);
        let vault_out = self.vault_signer(&pair, &addresses, side_in.other())?;
        let source = self.deriver.associated_account(&trader, &input_asset.mint())?;
        let dest = self.deriver.associated_account(&trader, &output_asset.mint())?;
        check_account(&self.ledger, &dest, &output_asset.mint(), &trader)?;

        let ledger = stage(&self.ledger, |ledger| {
            ledger.transfer(source, vault_in, result.amount_in(), trader)?;
            ledger.transfer(vault_out, dest, result.amount_out(), vault_out)
        })?;

        self.ledger = ledger;
        self.pools.insert(pair, staged);
        info!(
            %pair,
            %trader,
            input = %input_asset,
            amount_in = %result.amount_in(),
            amount_out = %result.amount_out(),
            fee = %result.fee(),
            "swapped"
        );
        self.events.push(AmmEvent::Swapped {
            pair,
            trader,
            input_asset,
            amount_in: result.amount_in(),
            amount_out: result.amount_out(),
            fee: result.fee(),
        });
        Ok(result)
    }

    // -- Internals ----------------------------------------------------------

    fn derive_pool_addresses(&self, pair: &AssetPair) -> Result<PoolAddresses> {
        let (a, b) = pair.assets();
        let (vault_a, vault_a_bump) = self.deriver.derive(&vault_seeds(a, b))?;
        let (vault_b, vault_b_bump) = self.deriver.derive(&vault_seeds(b, a))?;
        let (lp_mint, lp_mint_bump) = self.deriver.derive(&lp_mint_seeds(pair))?;
        Ok(PoolAddresses {
            vault_a,
            vault_a_bump,
            vault_b,
            vault_b_bump,
            lp_mint,
            lp_mint_bump,
        })
    }

    /// Proves authority over a vault by re-deriving it from its seeds and
    /// stored bump.
    fn vault_signer(&self, pair: &AssetPair, addresses: &PoolAddresses, side: Side) -> Result<Address> {
        let (a, b) = pair.assets();
        let seeds = match side {
            Side::A => vault_seeds(a, b),
            Side::B => vault_seeds(b, a),
        };
        let (vault, bump) = addresses.vault(side);
        if self.deriver.create_address(&seeds, bump)? != vault {
            return Err(AmmError::InvalidBump("stored bump does not derive the vault"));
        }
        Ok(vault)
    }

    /// Rejects accounts squatting on a new pool's addresses: vaults must
    /// hold their asset and own themselves, the liquidity mint must be its
    /// own authority.
    fn check_pool_accounts(&self, pair: &AssetPair, addresses: &PoolAddresses) -> Result<()> {
        check_account(&self.ledger, &addresses.vault_a, &pair.asset_a().mint(), &addresses.vault_a)?;
        check_account(&self.ledger, &addresses.vault_b, &pair.asset_b().mint(), &addresses.vault_b)?;
        if self.ledger.mint_exists(&addresses.lp_mint)
            && self.ledger.mint_authority(&addresses.lp_mint)? != addresses.lp_mint
        {
            return Err(AmmError::AccountExists("liquidity mint has a foreign authority"));
        }
        Ok(())
    }

    /// Copies `pool` with its supply taken from the liquidity mint on the
    /// ledger, which holders may burn from directly.
    fn reconciled(&self, pool: &PoolReserve) -> Result<PoolReserve> {
        let mut pool = pool.clone();
        let lp_mint = pool.addresses().lp_mint;
        if self.ledger.mint_exists(&lp_mint) {
            let supply = self.ledger.supply(&lp_mint)?;
            pool.reconcile_supply(Liquidity::new(supply.get()))?;
        }
        Ok(pool)
    }
}

/// Runs `effects` against a copy of `ledger` and returns the copy only if
/// every effect succeeded.
fn stage<L, F>(ledger: &L, effects: F) -> Result<L>
where
    L: AssetLedger + Clone,
    F: FnOnce(&mut L) -> Result<()>,
{
    let mut staged = ledger.clone();
    effects(&mut staged)?;
    Ok(staged)
}

/// Accepts an absent account, or an existing one that holds `mint` and
/// belongs to `owner`.
fn check_account<L: AssetLedger>(
    ledger: &L,
    account: &Address,
    mint: &Address,
    owner: &Address,
) -> Result<()> {
    if !ledger.account_exists(account) {
        return Ok(());
    }
    if ledger.account_mint(account)? != *mint {
        return Err(AmmError::InvalidAsset("existing account holds a different mint"));
    }
    if ledger.account_owner(account)? != *owner {
        return Err(AmmError::AccountExists("existing account has a foreign owner"));
    }
    Ok(())
}

fn open_if_absent<L: AssetLedger>(
    ledger: &mut L,
    account: Address,
    mint: Address,
    owner: Address,
) -> Result<()> {
    if ledger.account_exists(&account) {
        return Ok(());
    }
    ledger.create_account(account, mint, owner)
}

fn rejected<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    if let Err(error) = &result {
        debug!(operation, %error, "operation rejected");
    }
    result
}
