//! Pool engine constants
//!
//! Fixed for every pool the engine manages. Changing any of these changes
//! share accounting, so they are not part of the runtime configuration.

/// Denominator for basis-point quantities (10,000 bps = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Highest fee a pool may be created with (1000 bps = 10%)
pub const MAX_FEE_RATE_BPS: u16 = 1_000;

/// LP shares locked forever on the first deposit into an empty pool
///
/// These shares are counted in the total supply but belong to no owner, so
/// an active pool can never be drained back to a fully empty state by its
/// providers.
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Seed prefix for deriving pool addresses from their asset identities
pub const POOL_SEED: &[u8] = b"pool";

/// Slippage tolerances are expressed in bps of the expected amount
pub mod slippage {
    /// Largest meaningful tolerance (accept any output)
    pub const MAX_SLIPPAGE_BPS: u16 = 10_000;
}
