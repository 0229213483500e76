//! # MiniDEX AMM - Constant-Product Pool Engine
//!
//! ## Purpose
//!
//! Authoritative state machine for a two-asset constant-product pool. Tracks
//! both reserves, computes how many LP shares to mint or burn, and prices
//! swaps under `x * y = k` with a fee taken from the input. Exact integer
//! arithmetic throughout: floor rounding, checked `u128` intermediates, no
//! floating point in any amount.
//!
//! ## Integration Points
//!
//! - **Input**: a [`Pool`] record loaded by the host, plus validated operation
//!   arguments
//! - **Output**: the updated pool and the exact token movements the host must
//!   apply atomically with persisting it ([`DepositPlan`], [`Withdrawal`],
//!   [`SwapOutcome`])
//! - **Addressing**: pools are keyed by [`minidex_types::pool_key`], outside
//!   the engine
//!
//! ## Architecture Role
//!
//! ```text
//! host ──► PoolEngine ──► quote::plan_* ──► math
//!              │                │
//!              └── commit ◄─────┘ (after minimum checks)
//! ```
//!
//! - [`math`]: pure pricing and share formulas
//! - [`quote`]: read-only plans of each transition, also used for previews
//! - [`engine`]: validation, staging, and commit of the four transitions
//!
//! ## Example
//!
//! ```rust
//! use minidex_amm::{PoolEngine, SwapDirection};
//! use minidex_types::{AssetId, AuthorityId};
//!
//! let mut engine = PoolEngine::create(
//!     AuthorityId::new([9; 32]),
//!     AssetId::new([1; 32]),
//!     AssetId::new([2; 32]),
//!     30,
//! )?;
//!
//! let deposit = engine.add_liquidity(10_000, 40_000, 0)?;
//! assert_eq!(deposit.lp_to_provider(), 19_000);
//! engine.add_liquidity(5_000, 20_000, 0)?;
//!
//! let swap = engine.swap(1_000, 0, SwapDirection::AToB)?;
//! assert_eq!(swap.amount_out, 3_739);
//! # Ok::<(), minidex_amm::AmmError>(())
//! ```

pub mod engine;
pub mod error;
pub mod math;
pub mod pool;
pub mod quote;

pub use engine::PoolEngine;
pub use error::{AmmError, Result};
pub use pool::{Pool, PoolState, SwapDirection};
pub use quote::{min_amount_out, DepositPlan, SwapOutcome, Withdrawal};
