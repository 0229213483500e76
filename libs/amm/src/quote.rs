//! Read-only planning of pool transitions
//!
//! Each `plan_*` function computes the exact outcome of a transition from a
//! pool snapshot without touching it. The engine commits these plans after
//! checking the caller's minimums, and hosts use the same functions to
//! preview a trade, so a preview and the executed transition cannot disagree.

use crate::error::{AmmError, Result};
use crate::math;
use crate::pool::{Pool, PoolState, SwapDirection};
use minidex_config::protocol::MINIMUM_LIQUIDITY;
use minidex_types::AssetId;
use serde::{Deserialize, Serialize};

/// Outcome of adding liquidity
///
/// The two variants are the two pricing paths: the first deposit sets the
/// price and locks [`MINIMUM_LIQUIDITY`] shares, every later deposit follows
/// the existing reserve ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositPlan {
    /// Deposit into an empty pool
    Initial {
        amount_a: u64,
        amount_b: u64,
        lp_minted: u64,
    },
    /// Ratio-matched deposit into an active pool
    Proportional {
        amount_a: u64,
        amount_b: u64,
        lp_minted: u64,
    },
}

impl DepositPlan {
    /// Amount of A the host pulls from the provider
    pub fn amount_a(&self) -> u64 {
        match *self {
            DepositPlan::Initial { amount_a, .. } | DepositPlan::Proportional { amount_a, .. } => {
                amount_a
            }
        }
    }

    /// Amount of B the host pulls from the provider
    pub fn amount_b(&self) -> u64 {
        match *self {
            DepositPlan::Initial { amount_b, .. } | DepositPlan::Proportional { amount_b, .. } => {
                amount_b
            }
        }
    }

    /// Increase of the pool's total LP supply, locked shares included
    pub fn lp_minted(&self) -> u64 {
        match *self {
            DepositPlan::Initial { lp_minted, .. }
            | DepositPlan::Proportional { lp_minted, .. } => lp_minted,
        }
    }

    /// Shares that belong to no owner
    pub fn lp_locked(&self) -> u64 {
        match self {
            DepositPlan::Initial { .. } => MINIMUM_LIQUIDITY,
            DepositPlan::Proportional { .. } => 0,
        }
    }

    /// Shares the host mints to the provider
    pub fn lp_to_provider(&self) -> u64 {
        self.lp_minted() - self.lp_locked()
    }

    pub fn is_initial(&self) -> bool {
        matches!(self, DepositPlan::Initial { .. })
    }
}

/// Outcome of removing liquidity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Amount of A the host releases to the redeemer
    pub amount_a: u64,
    /// Amount of B the host releases to the redeemer
    pub amount_b: u64,
    /// Shares the host burns from the redeemer
    pub lp_burned: u64,
}

/// Outcome of a swap, direction resolved to concrete assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    pub direction: SwapDirection,
    /// Asset the host pulls from the trader
    pub asset_in: AssetId,
    /// Asset the host releases to the trader
    pub asset_out: AssetId,
    /// Full input, fee included; all of it joins the input reserve
    pub amount_in: u64,
    pub amount_in_after_fee: u64,
    /// Part of the input retained by the pool as fee
    pub fee_amount: u64,
    pub amount_out: u64,
    pub price_impact_bps: u16,
}

impl SwapOutcome {
    /// Whether the price impact reaches `threshold_bps`
    pub fn is_high_impact(&self, threshold_bps: u16) -> bool {
        self.price_impact_bps >= threshold_bps
    }

    /// Minimum output to submit with this trade for a slippage tolerance
    pub fn min_amount_out(&self, slippage_bps: u16) -> Result<u64> {
        min_amount_out(self.amount_out, slippage_bps)
    }
}

/// Slippage floor for an expected amount: `floor(expected * (10000 - bps) / 10000)`
pub fn min_amount_out(expected: u64, slippage_bps: u16) -> Result<u64> {
    math::apply_slippage(expected, slippage_bps)
}

/// Plan a deposit of up to `amount_a_desired` and `amount_b_desired`
pub fn plan_deposit(pool: &Pool, amount_a_desired: u64, amount_b_desired: u64) -> Result<DepositPlan> {
    if amount_a_desired == 0 || amount_b_desired == 0 {
        return Err(AmmError::ZeroAmount);
    }

    match pool.state() {
        PoolState::Empty => {
            let lp_minted = math::initial_lp_supply(amount_a_desired, amount_b_desired)?;
            if lp_minted <= MINIMUM_LIQUIDITY {
                return Err(AmmError::InsufficientLiquidity);
            }
            Ok(DepositPlan::Initial {
                amount_a: amount_a_desired,
                amount_b: amount_b_desired,
                lp_minted,
            })
        }
        PoolState::Active => {
            let (amount_a, amount_b) = math::proportional_amounts(
                amount_a_desired,
                amount_b_desired,
                pool.reserve_a,
                pool.reserve_b,
            )?;
            let lp_minted = math::lp_for_deposit(amount_a, pool.reserve_a, pool.total_lp_supply)?;
            if lp_minted == 0 {
                return Err(AmmError::ZeroLpTokens);
            }
            // A deposit that rounds one side to nothing would buy a claim on
            // that side for free
            if amount_a == 0 || amount_b == 0 {
                return Err(AmmError::InsufficientLiquidity);
            }

            Ok(DepositPlan::Proportional {
                amount_a,
                amount_b,
                lp_minted,
            })
        }
    }
}

/// Plan the redemption of `lp_tokens_in` shares
pub fn plan_withdrawal(pool: &Pool, lp_tokens_in: u64) -> Result<Withdrawal> {
    if lp_tokens_in == 0 {
        return Err(AmmError::ZeroLpTokens);
    }
    if pool.is_empty() {
        return Err(AmmError::EmptyPool);
    }
    if lp_tokens_in > pool.total_lp_supply {
        return Err(AmmError::InsufficientLpTokens {
            requested: lp_tokens_in,
            available: pool.total_lp_supply,
        });
    }

    let (amount_a, amount_b) = math::redemption_amounts(
        lp_tokens_in,
        pool.reserve_a,
        pool.reserve_b,
        pool.total_lp_supply,
    )?;

    Ok(Withdrawal {
        amount_a,
        amount_b,
        lp_burned: lp_tokens_in,
    })
}

/// Plan a trade of `amount_in` in `direction`
pub fn plan_swap(pool: &Pool, amount_in: u64, direction: SwapDirection) -> Result<SwapOutcome> {
    if amount_in == 0 {
        return Err(AmmError::ZeroAmount);
    }
    if pool.is_empty() {
        return Err(AmmError::EmptyPool);
    }

    let (reserve_in, reserve_out) = pool.reserves_for(direction);
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }

    let amount_in_after_fee = math::amount_after_fee(amount_in, pool.fee_rate_bps)?;
    let amount_out = math::swap_output(amount_in_after_fee, reserve_in, reserve_out)?;
    // Paying in for nothing back is never a trade the pool should accept
    if amount_out == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }

    let (asset_in, asset_out) = pool.assets_for(direction);
    Ok(SwapOutcome {
        direction,
        asset_in,
        asset_out,
        amount_in,
        amount_in_after_fee,
        fee_amount: amount_in - amount_in_after_fee,
        amount_out,
        price_impact_bps: math::price_impact_bps(amount_in_after_fee, reserve_in)?,
    })
}
