//! Decimal places of a ledger mint.

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Largest decimal count a `u64` balance can meaningfully carry.
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places a mint advertises for its balances.
///
/// The engine never scales amounts by decimals; the value is recorded on
/// liquidity-token mints so wallets can display balances.
///
/// # Examples
///
/// ```
/// use simple_amm::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.get(), 6);
/// assert!(Decimals::new(19).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Decimals of liquidity-token mints unless configured otherwise.
    pub const LIQUIDITY_DEFAULT: Self = Self(6);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Decimals {
    fn default() -> Self {
        Self::LIQUIDITY_DEFAULT
    }
}

impl TryFrom<u8> for Decimals {
    type Error = AmmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}
