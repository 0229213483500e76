//! Pool record and the views derived from it

use crate::error::{AmmError, Result};
use minidex_config::protocol::MAX_FEE_RATE_BPS;
use minidex_types::{pool_key, AssetId, AuthorityId, PoolKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Macro-state of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolState {
    /// No reserves and no LP shares outstanding
    Empty,
    /// Reserves on both sides and LP shares outstanding
    Active,
}

/// Which side of the pool a trade pays into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Pay asset A, receive asset B
    AToB,
    /// Pay asset B, receive asset A
    BToA,
}

impl SwapDirection {
    pub fn from_a_to_b(a_to_b: bool) -> Self {
        if a_to_b {
            SwapDirection::AToB
        } else {
            SwapDirection::BToA
        }
    }

    pub fn is_a_to_b(self) -> bool {
        self == SwapDirection::AToB
    }

    pub fn reversed(self) -> Self {
        match self {
            SwapDirection::AToB => SwapDirection::BToA,
            SwapDirection::BToA => SwapDirection::AToB,
        }
    }
}

impl From<bool> for SwapDirection {
    fn from(a_to_b: bool) -> Self {
        Self::from_a_to_b(a_to_b)
    }
}

/// A single two-asset pool
///
/// This is the whole persistent state of the engine. Hosts store and reload
/// it verbatim; [`Pool::validate`] checks a reloaded record before the engine
/// accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub authority: AuthorityId,
    pub token_a: AssetId,
    pub token_b: AssetId,
    pub fee_rate_bps: u16,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub total_lp_supply: u64,
}

impl Pool {
    pub(crate) fn empty(
        authority: AuthorityId,
        token_a: AssetId,
        token_b: AssetId,
        fee_rate_bps: u16,
    ) -> Self {
        Self {
            authority,
            token_a,
            token_b,
            fee_rate_bps,
            reserve_a: 0,
            reserve_b: 0,
            total_lp_supply: 0,
        }
    }

    /// Address of this pool on the host ledger
    pub fn key(&self) -> PoolKey {
        pool_key(&self.token_a, &self.token_b)
    }

    pub fn state(&self) -> PoolState {
        if self.total_lp_supply == 0 {
            PoolState::Empty
        } else {
            PoolState::Active
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state() == PoolState::Empty
    }

    /// Constant-product invariant `reserve_a * reserve_b`
    pub fn k(&self) -> u128 {
        (self.reserve_a as u128) * (self.reserve_b as u128)
    }

    /// `(reserve_in, reserve_out)` for a trade in `direction`
    pub fn reserves_for(&self, direction: SwapDirection) -> (u64, u64) {
        match direction {
            SwapDirection::AToB => (self.reserve_a, self.reserve_b),
            SwapDirection::BToA => (self.reserve_b, self.reserve_a),
        }
    }

    /// `(asset_in, asset_out)` for a trade in `direction`
    pub fn assets_for(&self, direction: SwapDirection) -> (AssetId, AssetId) {
        match direction {
            SwapDirection::AToB => (self.token_a, self.token_b),
            SwapDirection::BToA => (self.token_b, self.token_a),
        }
    }

    /// Units of B per unit of A at the current reserves, for display only
    pub fn spot_price_a_in_b(&self) -> Option<Decimal> {
        if self.reserve_a == 0 {
            return None;
        }
        Decimal::from(self.reserve_b).checked_div(Decimal::from(self.reserve_a))
    }

    /// Units of A per unit of B at the current reserves, for display only
    pub fn spot_price_b_in_a(&self) -> Option<Decimal> {
        if self.reserve_b == 0 {
            return None;
        }
        Decimal::from(self.reserve_a).checked_div(Decimal::from(self.reserve_b))
    }

    /// Check every record invariant
    pub fn validate(&self) -> Result<()> {
        if self.token_a == self.token_b {
            return Err(corrupt("token_a and token_b are identical"));
        }
        if self.fee_rate_bps > MAX_FEE_RATE_BPS {
            return Err(corrupt(format!(
                "fee rate {} bps exceeds maximum {}",
                self.fee_rate_bps, MAX_FEE_RATE_BPS
            )));
        }
        if (self.reserve_a == 0) != (self.reserve_b == 0) {
            return Err(corrupt(format!(
                "one-sided reserves ({}, {})",
                self.reserve_a, self.reserve_b
            )));
        }
        if (self.total_lp_supply == 0) != (self.reserve_a == 0) {
            return Err(corrupt(format!(
                "LP supply {} inconsistent with reserves ({}, {})",
                self.total_lp_supply, self.reserve_a, self.reserve_b
            )));
        }
        Ok(())
    }
}

fn corrupt(reason: impl Into<String>) -> AmmError {
    AmmError::CorruptPool {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_pool() -> Pool {
        Pool::empty(
            AuthorityId::new([9; 32]),
            AssetId::new([1; 32]),
            AssetId::new([2; 32]),
            30,
        )
    }

    #[test]
    fn test_empty_pool_views() {
        let pool = sample_pool();
        assert_eq!(pool.state(), PoolState::Empty);
        assert!(pool.is_empty());
        assert_eq!(pool.k(), 0);
        assert_eq!(pool.spot_price_a_in_b(), None);
        assert!(pool.validate().is_ok());
    }

    #[test]
    fn test_active_pool_views() {
        let mut pool = sample_pool();
        pool.reserve_a = 10_000;
        pool.reserve_b = 40_000;
        pool.total_lp_supply = 20_000;

        assert_eq!(pool.state(), PoolState::Active);
        assert_eq!(pool.k(), 400_000_000);
        assert_eq!(pool.spot_price_a_in_b(), Some(dec!(4)));
        assert_eq!(pool.spot_price_b_in_a(), Some(dec!(0.25)));
        assert!(pool.validate().is_ok());
    }

    #[test]
    fn test_direction_resolution() {
        let mut pool = sample_pool();
        pool.reserve_a = 1;
        pool.reserve_b = 2;

        assert_eq!(pool.reserves_for(SwapDirection::AToB), (1, 2));
        assert_eq!(pool.reserves_for(SwapDirection::BToA), (2, 1));
        assert_eq!(
            pool.assets_for(SwapDirection::BToA),
            (pool.token_b, pool.token_a)
        );
        assert_eq!(SwapDirection::from(true), SwapDirection::AToB);
        assert_eq!(SwapDirection::AToB.reversed(), SwapDirection::BToA);
        assert!(!SwapDirection::BToA.is_a_to_b());
    }

    #[test]
    fn test_key_follows_asset_order() {
        let pool = sample_pool();
        assert_eq!(pool.key(), pool_key(&pool.token_a, &pool.token_b));
    }

    #[test]
    fn test_validate_rejects_inconsistent_records() {
        let mut one_sided = sample_pool();
        one_sided.reserve_a = 5;
        one_sided.total_lp_supply = 5;
        assert!(matches!(
            one_sided.validate(),
            Err(AmmError::CorruptPool { .. })
        ));

        let mut orphan_supply = sample_pool();
        orphan_supply.total_lp_supply = 1;
        assert!(orphan_supply.validate().is_err());

        let mut unbacked_reserves = sample_pool();
        unbacked_reserves.reserve_a = 1;
        unbacked_reserves.reserve_b = 1;
        assert!(unbacked_reserves.validate().is_err());

        let mut same_assets = sample_pool();
        same_assets.token_b = same_assets.token_a;
        assert!(same_assets.validate().is_err());

        let mut high_fee = sample_pool();
        high_fee.fee_rate_bps = 1_001;
        assert!(high_fee.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut pool = sample_pool();
        pool.reserve_a = 15_000;
        pool.reserve_b = 60_000;
        pool.total_lp_supply = 30_000;

        let json = serde_json::to_string(&pool).unwrap();
        let back: Pool = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pool);
    }
}
