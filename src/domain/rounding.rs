//! Explicit rounding direction for integer division.

use serde::{Deserialize, Serialize};

/// Rounding direction for every division in the engine.
///
/// The engine always rounds against the caller: amounts paid out and
/// liquidity minted round [`Down`](Rounding::Down), amounts charged round
/// [`Up`](Rounding::Up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}
