use crate::pool::Asset;
use oramm_ledger::amount_serde;
use serde::{Deserialize, Serialize};

/// Journal entry appended by every committed pool operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum PoolEvent {
    LiquidityAdded {
        provider: String,
        #[serde(with = "amount_serde")]
        amount_a: u128,
        #[serde(with = "amount_serde")]
        amount_b: u128,
        #[serde(with = "amount_serde")]
        shares: u128,
        timestamp: u64,
    },
    LiquidityRemoved {
        provider: String,
        #[serde(with = "amount_serde")]
        amount_a: u128,
        #[serde(with = "amount_serde")]
        amount_b: u128,
        #[serde(with = "amount_serde")]
        shares: u128,
        timestamp: u64,
    },
    Swap {
        trader: String,
        asset_in: Asset,
        #[serde(with = "amount_serde")]
        amount_in: u128,
        #[serde(with = "amount_serde")]
        amount_out: u128,
        #[serde(with = "amount_serde")]
        fee: u128,
        timestamp: u64,
    },
}

impl PoolEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PoolEvent::LiquidityAdded { .. } => "LiquidityAdded",
            PoolEvent::LiquidityRemoved { .. } => "LiquidityRemoved",
            PoolEvent::Swap { .. } => "Swap",
        }
    }
}
