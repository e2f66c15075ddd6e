//! The global configuration singleton.
//!
//! [`AmmRegistry`] holds at most one [`AmmState`].  It is created by
//! `initialize_amm` and never updated or removed afterwards, so every pool
//! prices swaps with the same fee for the lifetime of the program.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, BasisPoints};
use crate::error::{AmmError, Result};

/// Contents of the configuration singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AmmState {
    /// Identity that initialized the program.
    pub authority: Address,
    /// Fee charged on every swap.
    pub fee: BasisPoints,
    /// Derived address of the singleton (`["amm_state"]`).
    pub address: Address,
    /// Bump that derives `address`.
    pub bump: u8,
}

/// Slot for the configuration singleton.
///
/// # Examples
///
/// ```
/// use simple_amm::domain::{Address, BasisPoints};
/// use simple_amm::error::AmmError;
/// use simple_amm::registry::AmmRegistry;
///
/// let mut registry = AmmRegistry::new();
/// let alice = Address::from_bytes([1; 32]);
/// let at = Address::from_bytes([2; 32]);
///
/// registry
///     .initialize(alice, BasisPoints::new(30), BasisPoints::MAX_PERCENT, at, 255)
///     .expect("first initialization");
/// assert_eq!(
///     registry.initialize(alice, BasisPoints::new(50), BasisPoints::MAX_PERCENT, at, 255),
///     Err(AmmError::AlreadyInitialized)
/// );
/// assert_eq!(registry.state().map(|s| s.fee), Ok(BasisPoints::new(30)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmRegistry {
    state: Option<AmmState>,
}

impl AmmRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Creates the singleton.
    ///
    /// # Errors
    ///
    /// - [`AmmError::AlreadyInitialized`] if the singleton exists; the
    ///   stored state is left unchanged.
    /// - [`AmmError::InvalidFee`] if `fee` exceeds 10 000 basis points or
    ///   `max_fee`.
    pub fn initialize(
        &mut self,
        authority: Address,
        fee: BasisPoints,
        max_fee: BasisPoints,
        address: Address,
        bump: u8,
    ) -> Result<&AmmState> {
        if self.state.is_some() {
            return Err(AmmError::AlreadyInitialized);
        }
        if !fee.is_valid_percent() {
            return Err(AmmError::InvalidFee("fee exceeds 10000 basis points"));
        }
        if fee > max_fee {
            return Err(AmmError::InvalidFee("fee exceeds the configured maximum"));
        }
        Ok(self.state.insert(AmmState {
            authority,
            fee,
            address,
            bump,
        }))
    }

    /// Returns the singleton.
    ///
    /// # Errors
    ///
    /// [`AmmError::NotInitialized`] before [`initialize`](Self::initialize).
    pub fn state(&self) -> Result<&AmmState> {
        self.state.as_ref().ok_or(AmmError::NotInitialized)
    }

    /// Returns `true` once the singleton exists.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.state.is_some()
    }
}
