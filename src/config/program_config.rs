//! Deployment parameters of an [`Amm`](crate::program::Amm) instance.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, BasisPoints, Decimals};
use crate::error::AmmError;

/// Program id used by [`ProgramConfig::default`].
pub const DEFAULT_PROGRAM_ID: Address = Address::from_bytes(*b"simple-amm-program-id-0000000001");

/// Deployment parameters.
///
/// # Validation
///
/// - `program_id` must not be the zero address.
/// - `max_fee` must not exceed 10 000 basis points.
///
/// # Examples
///
/// ```
/// use simple_amm::config::ProgramConfig;
///
/// let config: ProgramConfig = serde_json::from_str(r#"{"lp_decimals": 9}"#).expect("json");
/// assert_eq!(config.lp_decimals().get(), 9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    program_id: Address,
    lp_decimals: Decimals,
    max_fee: BasisPoints,
}

impl ProgramConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if a value is out of range.
    pub fn new(
        program_id: Address,
        lp_decimals: Decimals,
        max_fee: BasisPoints,
    ) -> Result<Self, AmmError> {
        let config = Self {
            program_id,
            lp_decimals,
            max_fee,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if a value is out of range.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.program_id.is_zero() {
            return Err(AmmError::InvalidConfiguration("program id must be non-zero"));
        }
        if !self.max_fee.is_valid_percent() {
            return Err(AmmError::InvalidConfiguration(
                "max fee must not exceed 10000 basis points",
            ));
        }
        Ok(())
    }

    /// Scope of every derived address.
    #[must_use]
    pub const fn program_id(&self) -> Address {
        self.program_id
    }

    /// Decimals of newly created liquidity-token mints.
    #[must_use]
    pub const fn lp_decimals(&self) -> Decimals {
        self.lp_decimals
    }

    /// Highest fee accepted at initialization.
    #[must_use]
    pub const fn max_fee(&self) -> BasisPoints {
        self.max_fee
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_id: DEFAULT_PROGRAM_ID,
            lp_decimals: Decimals::LIQUIDITY_DEFAULT,
            max_fee: BasisPoints::MAX_PERCENT,
        }
    }
}
