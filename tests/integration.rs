//! Integration tests exercising the full program through its public API.
//!
//! These tests drive an [`Amm`] over the in-memory ledger the way a client
//! would: fund accounts, initialize, deposit, trade and withdraw, and then
//! check balances, reserves and the emitted events.

#![allow(clippy::panic)]

use simple_amm::addressing::vault_seeds;
use simple_amm::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const ALICE: Address = Address::from_bytes([0xa1; 32]);
const BOB: Address = Address::from_bytes([0xb0; 32]);
const MALLORY: Address = Address::from_bytes([0x66; 32]);
const ISSUER: Address = Address::from_bytes([0x11; 32]);
const MINT_X: Address = Address::from_bytes([0x01; 32]);
const MINT_Y: Address = Address::from_bytes([0x02; 32]);
const FUNDING: u64 = 1_000_000;

type TestAmm = Amm<InMemoryLedger, Blake3Deriver>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn x() -> AssetId {
    AssetId::from_mint(MINT_X)
}

fn y() -> AssetId {
    AssetId::from_mint(MINT_Y)
}

fn amt(v: u64) -> Amount {
    Amount::new(v)
}

/// A program with both assets minted and Alice and Bob funded, not yet
/// initialized.
fn funded() -> TestAmm {
    init_tracing();
    let Ok(mut amm) = Amm::in_memory(ProgramConfig::default()) else {
        panic!("default config is valid");
    };
    for mint in [MINT_X, MINT_Y] {
        let Ok(()) = amm
            .ledger_mut()
            .create_mint(mint, ISSUER, Decimals::default())
        else {
            panic!("mint created");
        };
        for owner in [ALICE, BOB] {
            let Ok(account) = amm.associated_account(&owner, &mint) else {
                panic!("account derivable");
            };
            let ledger = amm.ledger_mut();
            let Ok(()) = ledger.create_account(account, mint, owner) else {
                panic!("account created");
            };
            let Ok(()) = ledger.mint(mint, account, amt(FUNDING), ISSUER) else {
                panic!("account funded");
            };
        }
    }
    amm
}

/// Alice initializes with a 30 bp fee and Bob seeds 10 000 X / 500 Y.
fn seeded() -> TestAmm {
    let mut amm = funded();
    let Ok(_) = amm.initialize_amm(ALICE, 30) else {
        panic!("first initialization");
    };
    let bounds = DepositBounds::new(amt(10_000), amt(500), amt(10_000), amt(500));
    let Ok(deposit) = amm.add_liquidity(BOB, x(), y(), bump(&amm), bounds) else {
        panic!("seed deposit");
    };
    assert_eq!(deposit.minted, Liquidity::new(2_236));
    amm
}

fn bump(amm: &TestAmm) -> u8 {
    let Ok((_, bump)) = amm.lp_mint_address(x(), y()) else {
        panic!("lp mint derivable");
    };
    bump
}

fn balance(amm: &TestAmm, owner: &Address, mint: &Address) -> u64 {
    let Ok(account) = amm.associated_account(owner, mint) else {
        panic!("account derivable");
    };
    match amm.ledger().balance_of(&account) {
        Ok(amount) => amount.get(),
        Err(_) => 0,
    }
}

fn bob_position(amm: &TestAmm) -> Address {
    let Ok((lp_mint, _)) = amm.lp_mint_address(x(), y()) else {
        panic!("lp mint derivable");
    };
    let Ok(position) = amm.associated_account(&BOB, &lp_mint) else {
        panic!("position derivable");
    };
    position
}

/// Address of the vault that will hold asset X (the lower id) in the
/// `{X, Y}` pool.
fn vault_x(amm: &TestAmm) -> Address {
    let Ok((vault, _)) = amm.deriver().derive(&vault_seeds(&x(), &y())) else {
        panic!("vault derivable");
    };
    vault
}

fn reserves(amm: &TestAmm) -> ReserveSnapshot {
    let Ok(snapshot) = amm.get_reserves(x(), y()) else {
        panic!("pool exists");
    };
    snapshot
}

// ===========================================================================
// Suite 1: Configuration
// ===========================================================================

#[test]
fn initialize_once_then_reject() {
    let mut amm = funded();
    let Ok(state) = amm.initialize_amm(ALICE, 30) else {
        panic!("first initialization");
    };
    assert_eq!(state.authority, ALICE);
    assert_eq!(state.fee, BasisPoints::new(30));

    assert_eq!(amm.initialize_amm(BOB, 50), Err(AmmError::AlreadyInitialized));
    let Ok(stored) = amm.state() else {
        panic!("still initialized");
    };
    assert_eq!(stored.authority, ALICE);
    assert_eq!(stored.fee, BasisPoints::new(30));
}

#[test]
fn fee_above_configured_maximum_rejected() {
    init_tracing();
    let Ok(config) = ProgramConfig::new(
        ProgramConfig::default().program_id(),
        Decimals::default(),
        BasisPoints::new(100),
    ) else {
        panic!("valid config");
    };
    let Ok(mut amm) = Amm::in_memory(config) else {
        panic!("valid config");
    };
    let Err(AmmError::InvalidFee(_)) = amm.initialize_amm(ALICE, 101) else {
        panic!("expected InvalidFee");
    };
    assert!(amm.initialize_amm(ALICE, 100).is_ok());
}

#[test]
fn operations_before_initialization_rejected() {
    let mut amm = funded();
    let bounds = DepositBounds::unbounded(amt(100), amt(100));
    let bump = bump(&amm);
    assert_eq!(
        amm.add_liquidity(BOB, x(), y(), bump, bounds),
        Err(AmmError::NotInitialized)
    );
    assert_eq!(
        amm.swap(BOB, x(), y(), amt(10), Amount::ZERO),
        Err(AmmError::NotInitialized)
    );
}

// ===========================================================================
// Suite 2: Liquidity lifecycle
// ===========================================================================

#[test]
fn first_deposit_sets_price_and_mints_geometric_mean() {
    let amm = seeded();
    assert_eq!(
        reserves(&amm),
        ReserveSnapshot::new(amt(10_000), amt(500), Liquidity::new(2_236))
    );
    assert_eq!(amm.position_balance(&BOB, x(), y()), Ok(Liquidity::new(2_236)));
    assert_eq!(balance(&amm, &BOB, &MINT_X), FUNDING - 10_000);
    assert_eq!(balance(&amm, &BOB, &MINT_Y), FUNDING - 500);

    let Ok(pool) = amm.pool(x(), y()) else {
        panic!("pool exists");
    };
    let vaults = pool.addresses();
    assert_eq!(amm.ledger().balance_of(&vaults.vault_a), Ok(amt(10_000)));
    assert_eq!(amm.ledger().balance_of(&vaults.vault_b), Ok(amt(500)));
    assert_eq!(amm.ledger().supply(&vaults.lp_mint), Ok(amt(2_236)));
}

#[test]
fn later_deposit_follows_pool_ratio() {
    let mut amm = seeded();
    let bounds = DepositBounds::unbounded(amt(2_000), amt(1_000));
    let Ok(deposit) = amm.add_liquidity(ALICE, x(), y(), bump(&amm), bounds) else {
        panic!("deposit");
    };
    assert_eq!((deposit.amount_a, deposit.amount_b), (amt(2_000), amt(100)));
    assert_eq!(deposit.minted, Liquidity::new(447));
    assert_eq!(
        reserves(&amm),
        ReserveSnapshot::new(amt(12_000), amt(600), Liquidity::new(2_683))
    );
}

#[test]
fn reversed_asset_order_hits_same_pool() {
    let mut amm = seeded();
    // Caller order (Y, X): desired Y = 100, desired X = 2 000.
    let bounds = DepositBounds::unbounded(amt(100), amt(2_000));
    let Ok(deposit) = amm.add_liquidity(ALICE, y(), x(), bump(&amm), bounds) else {
        panic!("deposit");
    };
    assert_eq!((deposit.amount_a, deposit.amount_b), (amt(2_000), amt(100)));
    assert_eq!(amm.get_reserves(y(), x()), amm.get_reserves(x(), y()));
    assert_eq!(amm.position_balance(&ALICE, y(), x()), Ok(Liquidity::new(447)));
}

#[test]
fn deposit_slippage_leaves_state_untouched() {
    let mut amm = seeded();
    let before = reserves(&amm);
    let bounds = DepositBounds::new(amt(2_000), amt(1_000), Amount::ZERO, amt(200));
    let Err(err) = amm.add_liquidity(ALICE, x(), y(), bump(&amm), bounds) else {
        panic!("expected slippage failure");
    };
    assert!(err.is_slippage());
    assert_eq!(reserves(&amm), before);
    assert_eq!(balance(&amm, &ALICE, &MINT_X), FUNDING);
    assert_eq!(balance(&amm, &ALICE, &MINT_Y), FUNDING);
    assert_eq!(amm.position_balance(&ALICE, x(), y()), Ok(Liquidity::ZERO));
}

#[test]
fn invalid_bump_rejected() {
    let mut amm = funded();
    let Ok(_) = amm.initialize_amm(ALICE, 30) else {
        panic!("first initialization");
    };
    let wrong = bump(&amm).wrapping_add(1);
    let bounds = DepositBounds::unbounded(amt(100), amt(100));
    let Err(AmmError::InvalidBump(_)) = amm.add_liquidity(BOB, x(), y(), wrong, bounds) else {
        panic!("expected InvalidBump");
    };
    assert_eq!(amm.get_reserves(x(), y()), Err(AmmError::PoolNotFound));
}

#[test]
fn full_withdrawal_returns_deposit_and_closes_position() {
    let mut amm = seeded();
    let Ok(withdrawal) = amm.remove_liquidity(
        BOB,
        x(),
        y(),
        Liquidity::new(2_236),
        amt(10_000),
        amt(500),
    ) else {
        panic!("withdrawal");
    };
    assert_eq!((withdrawal.amount_a, withdrawal.amount_b), (amt(10_000), amt(500)));
    assert_eq!(balance(&amm, &BOB, &MINT_X), FUNDING);
    assert_eq!(balance(&amm, &BOB, &MINT_Y), FUNDING);
    assert_eq!(reserves(&amm), ReserveSnapshot::EMPTY);

    let Ok((lp_mint, _)) = amm.lp_mint_address(x(), y()) else {
        panic!("lp mint derivable");
    };
    let Ok(position) = amm.associated_account(&BOB, &lp_mint) else {
        panic!("position derivable");
    };
    assert!(!amm.ledger().account_exists(&position));
}

#[test]
fn emptied_pool_can_be_reseeded_at_new_price() {
    let mut amm = seeded();
    let Ok(_) = amm.remove_liquidity(BOB, x(), y(), Liquidity::new(2_236), Amount::ZERO, Amount::ZERO)
    else {
        panic!("withdrawal");
    };
    let bounds = DepositBounds::unbounded(amt(400), amt(100));
    let Ok(deposit) = amm.add_liquidity(ALICE, x(), y(), bump(&amm), bounds) else {
        panic!("reseed");
    };
    assert_eq!(deposit.minted, Liquidity::new(200));
}

#[test]
fn partial_withdrawal_with_reversed_minimums() {
    let mut amm = seeded();
    // Caller order (Y, X): Y minimum 50, X minimum 1 000.
    let Ok(withdrawal) =
        amm.remove_liquidity(BOB, y(), x(), Liquidity::new(236), amt(50), amt(1_000))
    else {
        panic!("withdrawal");
    };
    assert_eq!((withdrawal.amount_a, withdrawal.amount_b), (amt(1_055), amt(52)));
    assert_eq!(amm.position_balance(&BOB, x(), y()), Ok(Liquidity::new(2_000)));

    let too_strict = amm.remove_liquidity(BOB, y(), x(), Liquidity::new(236), amt(60), Amount::ZERO);
    let Err(err) = too_strict else {
        panic!("expected slippage failure");
    };
    assert!(err.is_slippage());
}

#[test]
fn withdrawal_beyond_position_rejected() {
    let mut amm = seeded();
    assert_eq!(
        amm.remove_liquidity(BOB, x(), y(), Liquidity::new(2_237), Amount::ZERO, Amount::ZERO),
        Err(AmmError::InsufficientLiquidity)
    );
    assert_eq!(
        amm.remove_liquidity(ALICE, x(), y(), Liquidity::new(1), Amount::ZERO, Amount::ZERO),
        Err(AmmError::InsufficientLiquidity)
    );
}

// ===========================================================================
// Suite 3: Swaps
// ===========================================================================

#[test]
fn alice_swaps_against_bobs_pool() {
    let mut amm = seeded();
    let k_before = reserves(&amm).k();

    let Ok(result) = amm.swap(ALICE, x(), y(), amt(100), amt(4)) else {
        panic!("swap");
    };
    assert_eq!(result.amount_in(), amt(100));
    assert_eq!(result.amount_out(), amt(4));
    assert_eq!(result.fee(), amt(1));

    let after = reserves(&amm);
    assert_eq!((after.reserve_a, after.reserve_b), (amt(10_100), amt(496)));
    assert!(after.k() > k_before);
    assert_eq!(balance(&amm, &ALICE, &MINT_X), FUNDING - 100);
    assert_eq!(balance(&amm, &ALICE, &MINT_Y), FUNDING + 4);
}

#[test]
fn swap_below_minimum_output_rejected() {
    let mut amm = seeded();
    let Err(err) = amm.swap(ALICE, x(), y(), amt(100), amt(5)) else {
        panic!("expected slippage failure");
    };
    assert!(err.is_slippage());
    assert_eq!(
        reserves(&amm),
        ReserveSnapshot::new(amt(10_000), amt(500), Liquidity::new(2_236))
    );
    assert_eq!(balance(&amm, &ALICE, &MINT_X), FUNDING);
}

#[test]
fn exact_out_swap_charges_rounded_up_input() {
    let mut amm = seeded();
    let Ok(result) = amm.swap_exact_out(ALICE, x(), y(), amt(4), amt(82)) else {
        panic!("swap");
    };
    assert_eq!(result.amount_in(), amt(82));
    assert_eq!(result.amount_out(), amt(4));
    assert_eq!(balance(&amm, &ALICE, &MINT_Y), FUNDING + 4);

    let Err(err) = amm.swap_exact_out(ALICE, x(), y(), amt(4), amt(81)) else {
        panic!("expected slippage failure");
    };
    assert!(err.is_slippage());
}

#[test]
fn swap_draining_output_reserve_rejected() {
    let mut amm = seeded();
    assert_eq!(
        amm.swap_exact_out(ALICE, x(), y(), amt(500), Amount::MAX),
        Err(AmmError::InsufficientLiquidity)
    );
}

#[test]
fn swap_without_balance_rolls_back() {
    let mut amm = seeded();
    let before = reserves(&amm);
    assert_eq!(
        amm.swap(ALICE, y(), x(), amt(FUNDING + 1), Amount::ZERO),
        Err(AmmError::InsufficientBalance)
    );
    assert_eq!(reserves(&amm), before);
}

#[test]
fn swap_on_missing_pool_rejected() {
    let mut amm = funded();
    let Ok(_) = amm.initialize_amm(ALICE, 30) else {
        panic!("first initialization");
    };
    assert_eq!(
        amm.swap(ALICE, x(), y(), amt(100), Amount::ZERO),
        Err(AmmError::PoolNotFound)
    );
}

#[test]
fn round_trip_trades_never_profit() {
    let mut amm = seeded();
    let Ok(first) = amm.swap(ALICE, x(), y(), amt(1_000), Amount::ZERO) else {
        panic!("swap");
    };
    let Ok(back) = amm.swap(ALICE, y(), x(), first.amount_out(), Amount::ZERO) else {
        panic!("swap back");
    };
    assert!(back.amount_out() < amt(1_000));
    assert!(balance(&amm, &ALICE, &MINT_X) < FUNDING);
}

// ===========================================================================
// Suite 4: Full lifecycle and events
// ===========================================================================

#[test]
fn provider_earns_fees_over_lifecycle() {
    let mut amm = seeded();
    for _ in 0..5 {
        let Ok(out) = amm.swap(ALICE, x(), y(), amt(500), Amount::ZERO) else {
            panic!("swap");
        };
        let Ok(_) = amm.swap(ALICE, y(), x(), out.amount_out(), Amount::ZERO) else {
            panic!("swap back");
        };
    }
    let Ok(withdrawal) =
        amm.remove_liquidity(BOB, x(), y(), Liquidity::new(2_236), Amount::ZERO, Amount::ZERO)
    else {
        panic!("withdrawal");
    };
    let k_out = withdrawal.amount_a.widen() * withdrawal.amount_b.widen();
    assert!(k_out > 10_000 * 500);
    assert_eq!(reserves(&amm), ReserveSnapshot::EMPTY);
}

#[test]
fn events_record_committed_operations_only() {
    let mut amm = seeded();
    let _ = amm.swap(ALICE, x(), y(), amt(100), amt(5));
    let Ok(_) = amm.swap(ALICE, x(), y(), amt(100), amt(4)) else {
        panic!("swap");
    };

    let events = amm.take_events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events.first(), Some(AmmEvent::Initialized { .. })));
    assert!(matches!(
        events.get(1),
        Some(AmmEvent::LiquidityAdded { minted, .. }) if *minted == Liquidity::new(2_236)
    ));
    let Some(AmmEvent::Swapped {
        trader,
        input_asset,
        amount_out,
        ..
    }) = events.get(2)
    else {
        panic!("expected Swapped");
    };
    assert_eq!(*trader, ALICE);
    assert_eq!(*input_asset, x());
    assert_eq!(*amount_out, amt(4));
    assert!(amm.take_events().is_empty());
}

#[test]
fn events_serialize_with_kind_tag() {
    let mut amm = seeded();
    let events = amm.take_events();
    let Ok(json) = serde_json::to_value(&events) else {
        panic!("serializable");
    };
    assert_eq!(json[0]["kind"], "initialized");
    assert_eq!(json[1]["kind"], "liquidity_added");
}

// ===========================================================================
// Suite 5: Ledger state outside the program
// ===========================================================================

#[test]
fn direct_burn_raises_remaining_shares() {
    let mut amm = seeded();
    let Ok((lp_mint, _)) = amm.lp_mint_address(x(), y()) else {
        panic!("lp mint derivable");
    };
    let position = bob_position(&amm);
    let Ok(()) = amm.ledger_mut().burn(lp_mint, position, amt(236), BOB) else {
        panic!("holder may burn");
    };
    assert_eq!(
        reserves(&amm),
        ReserveSnapshot::new(amt(10_000), amt(500), Liquidity::new(2_000))
    );

    let Ok(result) = amm.swap(ALICE, x(), y(), amt(100), amt(4)) else {
        panic!("swap after burn");
    };
    assert_eq!(result.amount_out(), amt(4));

    let Ok(withdrawal) =
        amm.remove_liquidity(BOB, x(), y(), Liquidity::new(2_000), Amount::ZERO, Amount::ZERO)
    else {
        panic!("withdrawal after burn");
    };
    assert_eq!((withdrawal.amount_a, withdrawal.amount_b), (amt(10_100), amt(496)));
    assert_eq!(reserves(&amm), ReserveSnapshot::EMPTY);
}

#[test]
fn burning_whole_supply_leaves_reserves_to_next_depositor() {
    let mut amm = seeded();
    let Ok((lp_mint, _)) = amm.lp_mint_address(x(), y()) else {
        panic!("lp mint derivable");
    };
    let position = bob_position(&amm);
    let Ok(()) = amm.ledger_mut().burn(lp_mint, position, amt(2_236), BOB) else {
        panic!("holder may burn");
    };
    assert!(reserves(&amm).is_empty());

    let bounds = DepositBounds::unbounded(amt(400), amt(100));
    let Ok(deposit) = amm.add_liquidity(ALICE, x(), y(), bump(&amm), bounds) else {
        panic!("deposit into unclaimed reserves");
    };
    assert_eq!(deposit.minted, Liquidity::new(200));
    assert_eq!(
        reserves(&amm),
        ReserveSnapshot::new(amt(10_400), amt(600), Liquidity::new(200))
    );

    let Ok(withdrawal) =
        amm.remove_liquidity(ALICE, x(), y(), Liquidity::new(200), Amount::ZERO, Amount::ZERO)
    else {
        panic!("withdrawal");
    };
    assert_eq!((withdrawal.amount_a, withdrawal.amount_b), (amt(10_400), amt(600)));
    assert_eq!(balance(&amm, &ALICE, &MINT_X), FUNDING + 10_000);
}

#[test]
fn liquidity_minted_outside_program_rejected() {
    let mut amm = seeded();
    let Ok((lp_mint, _)) = amm.lp_mint_address(x(), y()) else {
        panic!("lp mint derivable");
    };
    let position = bob_position(&amm);
    let Ok(()) = amm.ledger_mut().mint(lp_mint, position, amt(5), lp_mint) else {
        panic!("ledger accepts the mint authority");
    };
    assert_eq!(
        amm.swap(ALICE, x(), y(), amt(100), Amount::ZERO),
        Err(AmmError::InvariantViolation)
    );
    assert_eq!(amm.get_reserves(x(), y()), Err(AmmError::InvariantViolation));
    assert_eq!(balance(&amm, &ALICE, &MINT_X), FUNDING);
}

#[test]
fn squatted_vault_rejects_first_deposit() {
    let mut amm = funded();
    let Ok(_) = amm.initialize_amm(ALICE, 30) else {
        panic!("first initialization");
    };
    let vault = vault_x(&amm);
    let Ok(()) = amm.ledger_mut().create_account(vault, MINT_X, MALLORY) else {
        panic!("account created");
    };

    let bounds = DepositBounds::unbounded(amt(10_000), amt(500));
    let Err(AmmError::AccountExists(_)) = amm.add_liquidity(BOB, x(), y(), bump(&amm), bounds)
    else {
        panic!("expected AccountExists");
    };
    assert_eq!(balance(&amm, &BOB, &MINT_X), FUNDING);
    assert_eq!(amm.ledger().balance_of(&vault), Ok(Amount::ZERO));
    assert_eq!(amm.get_reserves(x(), y()), Err(AmmError::PoolNotFound));
}

#[test]
fn vault_holding_wrong_asset_rejected() {
    let mut amm = funded();
    let Ok(_) = amm.initialize_amm(ALICE, 30) else {
        panic!("first initialization");
    };
    let vault = vault_x(&amm);
    let Ok(()) = amm.ledger_mut().create_account(vault, MINT_Y, vault) else {
        panic!("account created");
    };

    let bounds = DepositBounds::unbounded(amt(10_000), amt(500));
    let Err(AmmError::InvalidAsset(_)) = amm.add_liquidity(BOB, x(), y(), bump(&amm), bounds)
    else {
        panic!("expected InvalidAsset");
    };
}

#[test]
fn well_formed_existing_vault_is_adopted() {
    let mut amm = funded();
    let Ok(_) = amm.initialize_amm(ALICE, 30) else {
        panic!("first initialization");
    };
    let vault = vault_x(&amm);
    let Ok(()) = amm.ledger_mut().create_account(vault, MINT_X, vault) else {
        panic!("account created");
    };

    let bounds = DepositBounds::unbounded(amt(10_000), amt(500));
    let Ok(deposit) = amm.add_liquidity(BOB, x(), y(), bump(&amm), bounds) else {
        panic!("deposit");
    };
    assert_eq!(deposit.minted, Liquidity::new(2_236));
    assert_eq!(amm.ledger().balance_of(&vault), Ok(amt(10_000)));
}

#[test]
fn squatted_liquidity_mint_rejected() {
    let mut amm = funded();
    let Ok(_) = amm.initialize_amm(ALICE, 30) else {
        panic!("first initialization");
    };
    let Ok((lp_mint, _)) = amm.lp_mint_address(x(), y()) else {
        panic!("lp mint derivable");
    };
    let Ok(()) = amm
        .ledger_mut()
        .create_mint(lp_mint, MALLORY, Decimals::default())
    else {
        panic!("mint created");
    };

    let bounds = DepositBounds::unbounded(amt(10_000), amt(500));
    let Err(AmmError::AccountExists(_)) = amm.add_liquidity(BOB, x(), y(), bump(&amm), bounds)
    else {
        panic!("expected AccountExists");
    };
    assert_eq!(balance(&amm, &BOB, &MINT_Y), FUNDING);
}

#[test]
fn squatted_position_rejected() {
    let mut amm = funded();
    let Ok(_) = amm.initialize_amm(ALICE, 30) else {
        panic!("first initialization");
    };
    let Ok((lp_mint, _)) = amm.lp_mint_address(x(), y()) else {
        panic!("lp mint derivable");
    };
    let position = bob_position(&amm);
    let ledger = amm.ledger_mut();
    let squat = ledger
        .create_mint(lp_mint, lp_mint, Decimals::default())
        .and_then(|()| ledger.create_account(position, lp_mint, MALLORY));
    let Ok(()) = squat else {
        panic!("accounts created");
    };

    let bounds = DepositBounds::unbounded(amt(10_000), amt(500));
    let Err(AmmError::AccountExists(_)) = amm.add_liquidity(BOB, x(), y(), bump(&amm), bounds)
    else {
        panic!("expected AccountExists");
    };
    assert_eq!(balance(&amm, &BOB, &MINT_X), FUNDING);
}
