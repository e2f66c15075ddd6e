//! Point-in-time view of a pool's reserves.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Liquidity, Side};

/// The reserves and liquidity supply of a pool, read once at the start of
/// an operation.
///
/// All engine calculations take a snapshot by value, so a single operation
/// can never observe two different reserve states.
///
/// # Examples
///
/// ```
/// use simple_amm::domain::{Amount, Liquidity, Side};
/// use simple_amm::pool::ReserveSnapshot;
///
/// let snap = ReserveSnapshot::new(Amount::new(10_000), Amount::new(500), Liquidity::new(2_236));
/// assert_eq!(snap.k(), 5_000_000);
/// assert_eq!(snap.oriented(Side::B), (Amount::new(500), Amount::new(10_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ReserveSnapshot {
    /// Reserve of the pair's asset A.
    pub reserve_a: Amount,
    /// Reserve of the pair's asset B.
    pub reserve_b: Amount,
    /// Outstanding liquidity tokens.
    pub lp_supply: Liquidity,
}

impl ReserveSnapshot {
    /// The snapshot of a pool nobody has deposited into.
    pub const EMPTY: Self = Self::new(Amount::ZERO, Amount::ZERO, Liquidity::ZERO);

    /// Creates a snapshot from raw parts.
    #[must_use]
    pub const fn new(reserve_a: Amount, reserve_b: Amount, lp_supply: Liquidity) -> Self {
        Self {
            reserve_a,
            reserve_b,
            lp_supply,
        }
    }

    /// Returns `true` when no liquidity tokens are outstanding.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lp_supply.is_zero()
    }

    /// The constant product `reserve_a * reserve_b`.  Two `u64` factors
    /// always fit in `u128`.
    #[must_use]
    pub const fn k(&self) -> u128 {
        self.reserve_a.widen() * self.reserve_b.widen()
    }

    /// Returns `(reserve_in, reserve_out)` for a trade whose input lands on
    /// `side_in`.
    #[must_use]
    pub const fn oriented(&self, side_in: Side) -> (Amount, Amount) {
        match side_in {
            Side::A => (self.reserve_a, self.reserve_b),
            Side::B => (self.reserve_b, self.reserve_a),
        }
    }

    /// Returns the reserve on `side`.
    #[must_use]
    pub const fn reserve(&self, side: Side) -> Amount {
        match side {
            Side::A => self.reserve_a,
            Side::B => self.reserve_b,
        }
    }
}
