//! Error types for pool engine transitions
//!
//! Every variant is reported before any state is touched, so a caller that
//! receives an error can rely on the pool being exactly as it was.

use thiserror::Error;

/// Reasons a pool transition or preview can fail
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// Fee rate above the engine ceiling
    #[error("Invalid fee rate: {fee_rate_bps} bps exceeds maximum {max} bps")]
    InvalidFeeRate { fee_rate_bps: u16, max: u16 },

    /// Both sides of the pool name the same asset
    #[error("Pool assets must be distinct")]
    IdenticalAssets,

    /// A token amount that must be positive was zero
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    /// LP share amount to redeem, or to mint for a deposit, was zero
    #[error("LP token amount must be greater than zero")]
    ZeroLpTokens,

    /// An intermediate or resulting value left the checked integer range
    #[error("Math operation resulted in overflow")]
    MathOverflow,

    /// The pool cannot support the operation at its current depth
    #[error("Insufficient liquidity")]
    InsufficientLiquidity,

    /// More LP shares requested than exist
    #[error("Insufficient LP tokens: requested {requested}, outstanding {available}")]
    InsufficientLpTokens { requested: u64, available: u64 },

    /// Operation requires an active pool
    #[error("Pool is empty")]
    EmptyPool,

    /// Computed outcome fell below the caller's minimum
    #[error("Slippage tolerance exceeded: got {actual}, minimum {minimum}")]
    SlippageExceeded { actual: u64, minimum: u64 },

    /// Slippage tolerance above 100%
    #[error("Invalid slippage tolerance: {slippage_bps} bps")]
    InvalidSlippage { slippage_bps: u16 },

    /// A loaded pool record violates the pool invariants
    #[error("Corrupt pool record: {reason}")]
    CorruptPool { reason: String },
}

impl AmmError {
    /// True when resubmitting with looser minimums could succeed
    pub fn is_slippage(&self) -> bool {
        matches!(self, AmmError::SlippageExceeded { .. })
    }
}

pub type Result<T> = std::result::Result<T, AmmError>;
