//! # Simple AMM
//!
//! State-transition engine for a constant-product (`x * y = k`) automated
//! market maker over a host ledger of fungible assets.
//!
//! The crate covers the whole life of a pool: a one-time configuration
//! singleton that fixes the swap fee, two-sided deposits that mint
//! liquidity tokens, proportional withdrawals that burn them, and swaps
//! priced along the constant-product curve.  Every balance movement goes
//! through an [`AssetLedger`](traits::AssetLedger) and every record the
//! program owns lives at an address produced by an
//! [`AddressDeriver`](traits::AddressDeriver).
//!
//! # Quick Start
//!
//! ```rust
//! use simple_amm::prelude::*;
//!
//! let mint_x = Address::from_bytes([1; 32]);
//! let mint_y = Address::from_bytes([2; 32]);
//! let issuer = Address::from_bytes([3; 32]);
//! let bob = Address::from_bytes([4; 32]);
//!
//! let mut amm = Amm::in_memory(ProgramConfig::default()).expect("valid config");
//!
//! // Set up two assets and fund Bob on the ledger.
//! for mint in [mint_x, mint_y] {
//!     let account = amm.associated_account(&bob, &mint).expect("derivable");
//!     let ledger = amm.ledger_mut();
//!     ledger.create_mint(mint, issuer, Decimals::default()).expect("new mint");
//!     ledger.create_account(account, mint, bob).expect("new account");
//!     ledger.mint(mint, account, Amount::new(1_000_000), issuer).expect("funded");
//! }
//!
//! amm.initialize_amm(bob, 30).expect("first initialization");
//!
//! let x = AssetId::from_mint(mint_x);
//! let y = AssetId::from_mint(mint_y);
//! let (_, bump) = amm.lp_mint_address(x, y).expect("derivable");
//! let bounds = DepositBounds::unbounded(Amount::new(10_000), Amount::new(500));
//! let deposit = amm.add_liquidity(bob, x, y, bump, bounds).expect("deposit");
//! assert_eq!(deposit.minted, Liquidity::new(2_236));
//!
//! let result = amm.swap(bob, x, y, Amount::new(100), Amount::new(4)).expect("swap");
//! assert_eq!(result.amount_out(), Amount::new(4));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   program    │  Amm: registry, pools, staging, events
//! └──────┬───────┘
//!        │ ReserveSnapshot
//!        ▼
//! ┌──────────────┐
//! │    engine    │  pure pricing: quote, deposit, withdrawal, swap
//! └──────┬───────┘
//!        │ CheckedArithmetic, mul_div, isqrt
//!        ▼
//! ┌──────────────┐
//! │ domain, math │  Amount, Liquidity, AssetPair, BasisPoints, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`AssetPair`](domain::AssetPair), [`SwapSpec`](domain::SwapSpec), etc. |
//! | [`math`] | Checked arithmetic, widened `mul_div`, integer square root |
//! | [`engine`] | Pure pricing functions over a [`ReserveSnapshot`](pool::ReserveSnapshot) |
//! | [`pool`] | The per-pair reserve record and its invariant checks |
//! | [`traits`] | Host capabilities: [`AssetLedger`](traits::AssetLedger), [`AddressDeriver`](traits::AddressDeriver) |
//! | [`addressing`] | Seed layouts and the [`Blake3Deriver`](addressing::Blake3Deriver) |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) reference ledger |
//! | [`registry`] | The configuration singleton |
//! | [`program`] | [`Amm`](program::Amm), the operation surface |
//! | [`events`] | [`AmmEvent`](events::AmmEvent) records of committed operations |
//! | [`config`] | Deployment parameters |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod addressing;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod events;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod program;
pub mod registry;
pub mod traits;
