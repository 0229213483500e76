//! # MiniDEX Centralized Configuration
//!
//! Constants shared by the pool engine and its hosts, plus the loader for
//! host-tunable engine defaults.
//!
//! ## Usage
//!
//! ```rust
//! use minidex_config::{protocol, EngineConfig};
//!
//! assert_eq!(protocol::MINIMUM_LIQUIDITY, 1_000);
//!
//! let config = EngineConfig::default();
//! assert!(config.default_fee_rate_bps <= protocol::MAX_FEE_RATE_BPS);
//! ```

pub mod engine_config;
pub mod protocol;

pub use engine_config::{load_config, EngineConfig};
