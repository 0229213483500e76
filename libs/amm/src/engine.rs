//! Pool engine: the four state transitions over a single pool
//!
//! Each transition plans its outcome with [`crate::quote`], checks the
//! caller's minimums, stages the next pool value with checked arithmetic, and
//! only then replaces the current state. Any failure leaves the pool exactly
//! as it was.
//!
//! The engine performs no I/O and takes no locks. Hosts must serialize
//! transitions per pool: two transitions planned against the same snapshot
//! would both be priced on stale reserves.

use crate::error::{AmmError, Result};
use crate::pool::{Pool, SwapDirection};
use crate::quote::{self, DepositPlan, SwapOutcome, Withdrawal};
use minidex_config::protocol::MAX_FEE_RATE_BPS;
use minidex_types::{AssetId, AuthorityId};
use tracing::{debug, warn};

/// Owner of one pool's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEngine {
    pool: Pool,
}

impl PoolEngine {
    /// Create an empty pool trading `token_a` against `token_b`
    pub fn create(
        authority: AuthorityId,
        token_a: AssetId,
        token_b: AssetId,
        fee_rate_bps: u16,
    ) -> Result<Self> {
        if fee_rate_bps > MAX_FEE_RATE_BPS {
            return Err(AmmError::InvalidFeeRate {
                fee_rate_bps,
                max: MAX_FEE_RATE_BPS,
            });
        }
        if token_a == token_b {
            return Err(AmmError::IdenticalAssets);
        }

        let pool = Pool::empty(authority, token_a, token_b, fee_rate_bps);
        debug!(
            pool = %pool.key(),
            token_a = %token_a,
            token_b = %token_b,
            fee_rate_bps,
            "pool created"
        );
        Ok(Self { pool })
    }

    /// Resume an engine from a stored pool record
    pub fn load(pool: Pool) -> Result<Self> {
        pool.validate()?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn into_pool(self) -> Pool {
        self.pool
    }

    /// Deposit up to the desired amounts and mint LP shares
    ///
    /// `min_lp_out` bounds the shares the provider receives; on the first
    /// deposit that excludes the permanently locked shares.
    pub fn add_liquidity(
        &mut self,
        amount_a_desired: u64,
        amount_b_desired: u64,
        min_lp_out: u64,
    ) -> Result<DepositPlan> {
        let plan = quote::plan_deposit(&self.pool, amount_a_desired, amount_b_desired)?;
        check_minimum(plan.lp_to_provider(), min_lp_out, "add_liquidity")?;

        let mut next = self.pool.clone();
        next.reserve_a = checked_add(next.reserve_a, plan.amount_a())?;
        next.reserve_b = checked_add(next.reserve_b, plan.amount_b())?;
        next.total_lp_supply = checked_add(next.total_lp_supply, plan.lp_minted())?;

        self.commit(next);
        debug!(
            pool = %self.pool.key(),
            initial = plan.is_initial(),
            amount_a = plan.amount_a(),
            amount_b = plan.amount_b(),
            lp_minted = plan.lp_minted(),
            lp_to_provider = plan.lp_to_provider(),
            reserve_a = self.pool.reserve_a,
            reserve_b = self.pool.reserve_b,
            total_lp_supply = self.pool.total_lp_supply,
            "liquidity added"
        );
        Ok(plan)
    }

    /// Burn `lp_tokens_in` shares for a proportional share of both reserves
    ///
    /// The host must already have checked that the redeemer owns the shares.
    pub fn remove_liquidity(
        &mut self,
        lp_tokens_in: u64,
        min_amount_a_out: u64,
        min_amount_b_out: u64,
    ) -> Result<Withdrawal> {
        let withdrawal = quote::plan_withdrawal(&self.pool, lp_tokens_in)?;
        check_minimum(withdrawal.amount_a, min_amount_a_out, "remove_liquidity")?;
        check_minimum(withdrawal.amount_b, min_amount_b_out, "remove_liquidity")?;

        let mut next = self.pool.clone();
        next.reserve_a = checked_sub(next.reserve_a, withdrawal.amount_a)?;
        next.reserve_b = checked_sub(next.reserve_b, withdrawal.amount_b)?;
        next.total_lp_supply = checked_sub(next.total_lp_supply, withdrawal.lp_burned)?;

        self.commit(next);
        debug!(
            pool = %self.pool.key(),
            lp_burned = withdrawal.lp_burned,
            amount_a = withdrawal.amount_a,
            amount_b = withdrawal.amount_b,
            reserve_a = self.pool.reserve_a,
            reserve_b = self.pool.reserve_b,
            total_lp_supply = self.pool.total_lp_supply,
            "liquidity removed"
        );
        Ok(withdrawal)
    }

    /// Trade `amount_in` of one asset for the other
    pub fn swap(
        &mut self,
        amount_in: u64,
        min_amount_out: u64,
        direction: SwapDirection,
    ) -> Result<SwapOutcome> {
        let outcome = quote::plan_swap(&self.pool, amount_in, direction)?;
        check_minimum(outcome.amount_out, min_amount_out, "swap")?;

        let mut next = self.pool.clone();
        match direction {
            SwapDirection::AToB => {
                next.reserve_a = checked_add(next.reserve_a, outcome.amount_in)?;
                next.reserve_b = checked_sub(next.reserve_b, outcome.amount_out)?;
            }
            SwapDirection::BToA => {
                next.reserve_b = checked_add(next.reserve_b, outcome.amount_in)?;
                next.reserve_a = checked_sub(next.reserve_a, outcome.amount_out)?;
            }
        }
        debug_assert!(next.k() >= self.pool.k(), "swap decreased k");

        self.commit(next);
        debug!(
            pool = %self.pool.key(),
            ?direction,
            amount_in = outcome.amount_in,
            fee_amount = outcome.fee_amount,
            amount_out = outcome.amount_out,
            price_impact_bps = outcome.price_impact_bps,
            reserve_a = self.pool.reserve_a,
            reserve_b = self.pool.reserve_b,
            "swap executed"
        );
        Ok(outcome)
    }

    /// Preview a swap against the current reserves
    pub fn quote_swap(&self, amount_in: u64, direction: SwapDirection) -> Result<SwapOutcome> {
        quote::plan_swap(&self.pool, amount_in, direction)
    }

    /// Preview a deposit against the current reserves
    pub fn quote_add_liquidity(
        &self,
        amount_a_desired: u64,
        amount_b_desired: u64,
    ) -> Result<DepositPlan> {
        quote::plan_deposit(&self.pool, amount_a_desired, amount_b_desired)
    }

    /// Preview a redemption against the current reserves
    pub fn quote_remove_liquidity(&self, lp_tokens_in: u64) -> Result<Withdrawal> {
        quote::plan_withdrawal(&self.pool, lp_tokens_in)
    }

    fn commit(&mut self, next: Pool) {
        debug_assert!(next.validate().is_ok(), "transition broke pool invariants");
        self.pool = next;
    }
}

fn check_minimum(actual: u64, minimum: u64, operation: &'static str) -> Result<()> {
    if actual < minimum {
        warn!(operation, actual, minimum, "slippage tolerance exceeded");
        return Err(AmmError::SlippageExceeded { actual, minimum });
    }
    Ok(())
}

fn checked_add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(AmmError::MathOverflow)
}

fn checked_sub(a: u64, b: u64) -> Result<u64> {
    a.checked_sub(b).ok_or(AmmError::MathOverflow)
}
