//! Unified error types for the AMM engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Every error is terminal: an operation that fails leaves the
//! registry, the pool records and the asset ledger exactly as it found them.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = AmmError> = core::result::Result<T, E>;

/// Every failure the engine can surface to a caller.
///
/// Variants that carry a `&'static str` name the computation or check that
/// failed, so callers and logs can tell apart two overflows in the same
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AmmError {
    // -- configuration registry ----------------------------------------------
    /// The configuration singleton already exists.
    #[error("AMM is already initialized")]
    AlreadyInitialized,

    /// The configuration singleton does not exist yet.
    #[error("AMM is not initialized")]
    NotInitialized,

    /// A fee outside `0..=10_000` basis points (or above the configured cap).
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A program configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Decimal places outside the supported range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    // -- liquidity and swaps -------------------------------------------------
    /// A computed amount violates a caller-supplied minimum or maximum.
    #[error("slippage exceeded: {0}")]
    SlippageExceeded(&'static str),

    /// A deposit is too small to mint a single liquidity token.
    #[error("deposit mints zero liquidity tokens")]
    ZeroLiquidityMinted,

    /// The pool or the caller's position cannot cover the request.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A withdrawal or swap output would drive a reserve below zero.
    #[error("reserve underflow: {0}")]
    ReserveUnderflow(&'static str),

    /// One of the pool reserves is zero where a price is required.
    #[error("zero reserve")]
    ZeroReserve,

    /// An amount argument is zero or otherwise unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// The asset is not part of the pool, or a pair repeats one asset.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// No pool exists for the requested pair.
    #[error("pool not found")]
    PoolNotFound,

    /// Post-trade `reserve_a * reserve_b` fell below the pre-trade product.
    #[error("constant-product invariant violated")]
    InvariantViolation,

    // -- arithmetic ----------------------------------------------------------
    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    // -- addressing and ledger -----------------------------------------------
    /// The supplied bump does not reproduce the expected derived address.
    #[error("invalid bump seed: {0}")]
    InvalidBump(&'static str),

    /// The authority presented does not control the account or mint.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// The account holds less than the requested debit.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The account or mint does not exist on the ledger.
    #[error("account not found: {0}")]
    AccountNotFound(&'static str),

    /// The account or mint already exists on the ledger.
    #[error("account already exists: {0}")]
    AccountExists(&'static str),
}

impl AmmError {
    /// Returns `true` for errors caused by arithmetic limits rather than
    /// by caller input.
    #[must_use]
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Overflow(_) | Self::Underflow(_) | Self::DivisionByZero
        )
    }

    /// Returns `true` when resubmitting with looser bounds could succeed.
    #[must_use]
    pub const fn is_slippage(&self) -> bool {
        matches!(self, Self::SlippageExceeded(_))
    }
}
