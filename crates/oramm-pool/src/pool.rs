// SPDX-License-Identifier: AGPL-3.0-only
//! Pool state and the market it trades against.

use crate::error::PoolError;
use crate::math::{self, U256};
use oramm_ledger::{amount_serde, AssetLedger, LpShareLedger};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Holder of the shares locked on the first deposit when
/// `minimum_liquidity > 0`. No caller may act as this address.
pub const LOCKED_LIQUIDITY_HOLDER: &str = "0x000000000000000000000000000000000000dead";

/// One side of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    A,
    B,
}

impl Asset {
    pub fn other(self) -> Asset {
        match self {
            Asset::A => Asset::B,
            Asset::B => Asset::A,
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::A => f.write_str("A"),
            Asset::B => f.write_str("B"),
        }
    }
}

impl FromStr for Asset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "token-a" | "tokena" => Ok(Asset::A),
            "b" | "token-b" | "tokenb" => Ok(Asset::B),
            other => Err(format!("unknown asset {:?} (expected A or B)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Address holding the reserves on both asset ledgers
    pub address: String,
    #[serde(with = "amount_serde")]
    pub reserve_a: u128,
    #[serde(with = "amount_serde")]
    pub reserve_b: u128,
    /// Mirrors the LP ledger's total supply
    #[serde(with = "amount_serde")]
    pub lp_supply: u128,
    pub fee_bps: u16,
    /// Unix seconds of the last successful swap (0 = never)
    pub last_trade: u64,
}

impl Pool {
    pub fn new(address: impl Into<String>, fee_bps: u16) -> Self {
        Self {
            address: address.into(),
            reserve_a: 0,
            reserve_b: 0,
            lp_supply: 0,
            fee_bps,
            last_trade: 0,
        }
    }

    pub fn reserve(&self, asset: Asset) -> u128 {
        match asset {
            Asset::A => self.reserve_a,
            Asset::B => self.reserve_b,
        }
    }

    fn reserve_mut(&mut self, asset: Asset) -> &mut u128 {
        match asset {
            Asset::A => &mut self.reserve_a,
            Asset::B => &mut self.reserve_b,
        }
    }

    /// `(reserve_in, reserve_out)` for a swap paying in `asset_in`.
    pub fn reserves_for(&self, asset_in: Asset) -> (u128, u128) {
        (self.reserve(asset_in), self.reserve(asset_in.other()))
    }

    pub fn is_empty(&self) -> bool {
        self.reserve_a == 0 && self.reserve_b == 0
    }

    /// Both reserves are non-zero.
    pub fn is_liquid(&self) -> bool {
        self.reserve_a > 0 && self.reserve_b > 0
    }

    /// `reserve_a * reserve_b` in 256 bits.
    pub fn k(&self) -> U256 {
        math::product(self.reserve_a, self.reserve_b)
    }

    pub(crate) fn credit(&mut self, asset: Asset, amount: u128) -> Result<(), PoolError> {
        let r = self.reserve_mut(asset);
        *r = r
            .checked_add(amount)
            .ok_or(math::MathError::Overflow)?;
        Ok(())
    }

    pub(crate) fn debit(&mut self, asset: Asset, amount: u128) -> Result<(), PoolError> {
        let r = self.reserve_mut(asset);
        *r = r.checked_sub(amount).ok_or_else(|| {
            PoolError::InvariantViolation(format!("reserve {} would go negative", asset))
        })?;
        Ok(())
    }
}

/// Everything a pool operation touches: the pool record, both asset ledgers
/// and the LP share ledger. Operations run against a staged clone of this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market<A> {
    pub pool: Pool,
    pub asset_a: A,
    pub asset_b: A,
    pub lp: LpShareLedger,
}

impl<A: AssetLedger> Market<A> {
    pub fn ledger(&self, asset: Asset) -> &A {
        match asset {
            Asset::A => &self.asset_a,
            Asset::B => &self.asset_b,
        }
    }

    pub fn ledger_mut(&mut self, asset: Asset) -> &mut A {
        match asset {
            Asset::A => &mut self.asset_a,
            Asset::B => &mut self.asset_b,
        }
    }

    /// Check reserves against the ledgers and the LP supply against the
    /// share ledger.
    pub fn verify_invariants(&self) -> Result<(), PoolError> {
        for asset in [Asset::A, Asset::B] {
            let reserve = self.pool.reserve(asset);
            let held = self.ledger(asset).balance_of(&self.pool.address);
            if reserve != held {
                return Err(PoolError::InvariantViolation(format!(
                    "reserve {} is {} but the pool holds {}",
                    asset, reserve, held
                )));
            }
        }

        let supply = self.lp.total_supply();
        if supply != self.pool.lp_supply {
            return Err(PoolError::InvariantViolation(format!(
                "lp_supply {} != LP ledger supply {}",
                self.pool.lp_supply, supply
            )));
        }
        if self.lp.sum_of_balances() != Some(supply) {
            return Err(PoolError::InvariantViolation(
                "LP balances do not sum to the LP supply".to_string(),
            ));
        }

        // Liquidity is all-or-nothing: both reserves and the supply are zero together.
        let empty = self.pool.reserve_a == 0;
        if (self.pool.reserve_b == 0) != empty || (supply == 0) != empty {
            return Err(PoolError::InvariantViolation(format!(
                "partially empty pool: reserves ({}, {}), supply {}",
                self.pool.reserve_a, self.pool.reserve_b, supply
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oramm_ledger::FungibleLedger;

    fn market() -> Market<FungibleLedger> {
        let (lp, _auth) = LpShareLedger::new("lp", "LP Share", "OLP", 18).unwrap();
        Market {
            pool: Pool::new("pool", 30),
            asset_a: FungibleLedger::new("Token A", "TKA", 18, 1_000, "alice").unwrap(),
            asset_b: FungibleLedger::new("Token B", "TKB", 18, 1_000, "alice").unwrap(),
            lp,
        }
    }

    #[test]
    fn test_asset_parse() {
        assert_eq!("a".parse::<Asset>().unwrap(), Asset::A);
        assert_eq!("B".parse::<Asset>().unwrap(), Asset::B);
        assert_eq!("token-b".parse::<Asset>().unwrap(), Asset::B);
        assert!("c".parse::<Asset>().is_err());
        assert_eq!(Asset::A.other(), Asset::B);
    }

    #[test]
    fn test_fresh_market_is_consistent() {
        assert!(market().verify_invariants().is_ok());
    }

    #[test]
    fn test_phantom_reserve_detected() {
        let mut m = market();
        m.pool.reserve_a = 5;
        assert!(matches!(
            m.verify_invariants(),
            Err(PoolError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_unaccounted_balance_detected() {
        let mut m = market();
        m.asset_b.transfer("alice", "pool", 10).unwrap();
        assert!(m.verify_invariants().is_err());
    }

    #[test]
    fn test_reserve_debit_checked() {
        let mut p = Pool::new("pool", 30);
        p.credit(Asset::A, 10).unwrap();
        assert!(p.debit(Asset::A, 11).is_err());
        p.debit(Asset::A, 10).unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn test_reserves_for_direction() {
        let mut p = Pool::new("pool", 30);
        p.reserve_a = 1;
        p.reserve_b = 2;
        assert_eq!(p.reserves_for(Asset::A), (1, 2));
        assert_eq!(p.reserves_for(Asset::B), (2, 1));
        assert_eq!(p.k(), U256::from(2u8));
    }
}
