//! Property-based tests for the pricing engines.
//!
//! 1. **Geometric-mean mint**: an empty pool mints `floor(sqrt(a * b))`.
//! 2. **Ratio preservation**: a deposit into a funded pool moves the
//!    reserve ratio by at most one rounding step.
//! 3. **Constant product**: swaps never decrease `k`, and strictly increase
//!    it when a fee is charged.
//! 4. **Round trip**: deposit then withdraw returns no more than deposited.
//! 5. **Exact-out sufficiency**: the quoted input of an exact-out swap buys
//!    at least the requested output.

use proptest::prelude::*;

use super::liquidity::{plan_deposit, plan_withdrawal};
use super::swap::{quote_exact_in, quote_exact_out};
use crate::domain::{Address, Amount, AssetId, AssetPair, BasisPoints, DepositBounds, Side};
use crate::math::isqrt;
use crate::pool::{PoolAddresses, PoolReserve, ReserveSnapshot};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn make_pool() -> PoolReserve {
    let Ok(pair) = AssetPair::new(AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32]))
    else {
        panic!("valid pair");
    };
    let addresses = PoolAddresses {
        vault_a: Address::from_bytes([3; 32]),
        vault_a_bump: 255,
        vault_b: Address::from_bytes([4; 32]),
        vault_b_bump: 255,
        lp_mint: Address::from_bytes([5; 32]),
        lp_mint_bump: 255,
    };
    PoolReserve::new(pair, addresses)
}

/// A pool seeded with a first deposit of `(ra, rb)`.
fn seeded_pool(ra: u64, rb: u64) -> PoolReserve {
    let mut pool = make_pool();
    let bounds = DepositBounds::unbounded(Amount::new(ra), Amount::new(rb));
    let Ok(deposit) = plan_deposit(pool.snapshot(), &bounds) else {
        panic!("seed deposit");
    };
    let Ok(()) = pool.apply_deposit(deposit.amount_a, deposit.amount_b, deposit.minted) else {
        panic!("seed apply");
    };
    pool
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [1_000, 1_000_000_000].
fn reserve_strategy() -> impl Strategy<Value = u64> {
    1_000u64..=1_000_000_000u64
}

fn amount_strategy() -> impl Strategy<Value = u64> {
    1u64..=100_000_000u64
}

fn fee_strategy() -> impl Strategy<Value = u16> {
    0u16..=1_000u16
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::A), Just(Side::B)]
}

// ---------------------------------------------------------------------------
// Property 1: Geometric-mean mint
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_first_mint_is_floor_sqrt(a in any::<u64>(), b in any::<u64>()) {
        let bounds = DepositBounds::unbounded(Amount::new(a), Amount::new(b));
        let expected = isqrt(u128::from(a) * u128::from(b));
        match plan_deposit(ReserveSnapshot::EMPTY, &bounds) {
            Ok(deposit) => {
                prop_assert_eq!(u128::from(deposit.minted.get()), expected);
                prop_assert_eq!(deposit.amount_a, Amount::new(a));
                prop_assert_eq!(deposit.amount_b, Amount::new(b));
            }
            Err(_) => {
                prop_assert_eq!(expected, 0);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Ratio preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_deposit_preserves_ratio(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        da in amount_strategy(),
        db in amount_strategy(),
    ) {
        let mut pool = seeded_pool(ra, rb);
        let before = pool.snapshot();
        let bounds = DepositBounds::unbounded(Amount::new(da), Amount::new(db));
        let Ok(deposit) = plan_deposit(before, &bounds) else {
            return Ok(());
        };
        prop_assert!(deposit.amount_a <= Amount::new(da));
        prop_assert!(deposit.amount_b <= Amount::new(db));
        let Ok(()) = pool.apply_deposit(deposit.amount_a, deposit.amount_b, deposit.minted) else {
            return Ok(());
        };
        let after = pool.snapshot();

        // Cross-multiplied ratio drift: |ra' * rb - ra * rb'| < max(ra, rb).
        let lhs = after.reserve_a.widen() * before.reserve_b.widen();
        let rhs = before.reserve_a.widen() * after.reserve_b.widen();
        let bound = before.reserve_a.widen().max(before.reserve_b.widen());
        prop_assert!(
            lhs.abs_diff(rhs) < bound,
            "ratio drift {} exceeds one rounding step {}",
            lhs.abs_diff(rhs), bound
        );
    }
}

// ---------------------------------------------------------------------------
// Property 3: Constant product
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_swap_never_decreases_k(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_in in amount_strategy(),
        fee in fee_strategy(),
        side in side_strategy(),
    ) {
        let mut pool = seeded_pool(ra, rb);
        let k_before = pool.snapshot().k();
        let Ok(result) = quote_exact_in(pool.snapshot(), side, Amount::new(amount_in), BasisPoints::new(fee)) else {
            return Ok(());
        };
        prop_assert!(
            pool.apply_swap(side, result.amount_in(), result.amount_out()).is_ok(),
            "priced swap must apply"
        );
        let k_after = pool.snapshot().k();
        prop_assert!(k_after >= k_before);
        if fee > 0 {
            prop_assert!(k_after > k_before, "fee must grow k: {} vs {}", k_after, k_before);
        }
    }

    #[test]
    fn prop_swap_sequence_never_decreases_k(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        trades in proptest::collection::vec((amount_strategy(), side_strategy()), 1..16),
    ) {
        let mut pool = seeded_pool(ra, rb);
        let fee = BasisPoints::new(30);
        for (amount_in, side) in trades {
            let k_before = pool.snapshot().k();
            let Ok(result) = quote_exact_in(pool.snapshot(), side, Amount::new(amount_in), fee) else {
                continue;
            };
            prop_assert!(
                pool.apply_swap(side, result.amount_in(), result.amount_out()).is_ok(),
                "priced swap must apply"
            );
            prop_assert!(pool.snapshot().k() > k_before);
            prop_assert!(!pool.reserve_a().is_zero() && !pool.reserve_b().is_zero());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_deposit_withdraw_round_trip(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        da in amount_strategy(),
        db in amount_strategy(),
    ) {
        let mut pool = seeded_pool(ra, rb);
        let bounds = DepositBounds::unbounded(Amount::new(da), Amount::new(db));
        let Ok(deposit) = plan_deposit(pool.snapshot(), &bounds) else {
            return Ok(());
        };
        let Ok(()) = pool.apply_deposit(deposit.amount_a, deposit.amount_b, deposit.minted) else {
            return Ok(());
        };
        let Ok(withdrawal) = plan_withdrawal(
            pool.snapshot(),
            deposit.minted,
            deposit.minted,
            Amount::ZERO,
            Amount::ZERO,
        ) else {
            return Ok(());
        };
        prop_assert!(withdrawal.amount_a <= deposit.amount_a);
        prop_assert!(withdrawal.amount_b <= deposit.amount_b);

        prop_assert!(
            pool.apply_withdraw(withdrawal.amount_a, withdrawal.amount_b, withdrawal.burned).is_ok(),
            "planned withdrawal must apply"
        );
        // The original providers are never diluted.
        prop_assert!(pool.reserve_a() >= Amount::new(ra));
        prop_assert!(pool.reserve_b() >= Amount::new(rb));
    }
}

// ---------------------------------------------------------------------------
// Property 5: Exact-out sufficiency
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_exact_out_input_is_sufficient(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_out in 1u64..=999u64,
        fee in fee_strategy(),
        side in side_strategy(),
    ) {
        let snapshot = seeded_pool(ra, rb).snapshot();
        let fee = BasisPoints::new(fee);
        let Ok(quoted) = quote_exact_out(snapshot, side, Amount::new(amount_out), fee) else {
            return Ok(());
        };
        let check = quote_exact_in(snapshot, side, quoted.amount_in(), fee);
        prop_assert!(
            matches!(check, Ok(r) if r.amount_out() >= Amount::new(amount_out)),
            "quoted input {} must buy {}: {:?}",
            quoted.amount_in(), amount_out, check
        );
    }
}
