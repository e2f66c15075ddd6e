//! Program configuration.
//!
//! [`ProgramConfig`] carries the deployment parameters that are fixed
//! before the first instruction runs: the program id that scopes every
//! derived address, the precision of liquidity-token mints, and the
//! highest fee `initialize_amm` accepts.

mod program_config;

pub use program_config::ProgramConfig;
