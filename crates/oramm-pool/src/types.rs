//! Request and result types of the engine's public operations.

use crate::pool::Asset;
use oramm_ledger::amount_serde;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidityRequest {
    #[serde(with = "amount_serde")]
    pub amount_a: u128,
    #[serde(with = "amount_serde")]
    pub amount_b: u128,
    /// Slippage floor on minted shares (0 = none)
    #[serde(default, with = "amount_serde")]
    pub min_shares: u128,
}

impl AddLiquidityRequest {
    pub fn new(amount_a: u128, amount_b: u128) -> Self {
        Self {
            amount_a,
            amount_b,
            min_shares: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityAdded {
    #[serde(with = "amount_serde")]
    pub shares: u128,
    /// Amounts actually pulled into the pool
    #[serde(with = "amount_serde")]
    pub amount_a: u128,
    #[serde(with = "amount_serde")]
    pub amount_b: u128,
    /// Offered but not pulled (ratio mismatch)
    #[serde(with = "amount_serde")]
    pub refund_a: u128,
    #[serde(with = "amount_serde")]
    pub refund_b: u128,
}

/// How much liquidity to withdraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoveAmount {
    Shares(#[serde(with = "amount_serde")] u128),
    /// 1..=100 percent of the caller's current balance
    Percent(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidityRequest {
    pub amount: RemoveAmount,
    #[serde(default, with = "amount_serde")]
    pub min_amount_a: u128,
    #[serde(default, with = "amount_serde")]
    pub min_amount_b: u128,
}

impl From<RemoveAmount> for RemoveLiquidityRequest {
    fn from(amount: RemoveAmount) -> Self {
        Self {
            amount,
            min_amount_a: 0,
            min_amount_b: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityRemoved {
    #[serde(with = "amount_serde")]
    pub shares: u128,
    #[serde(with = "amount_serde")]
    pub amount_a: u128,
    #[serde(with = "amount_serde")]
    pub amount_b: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapKind {
    /// Spend exactly `amount_in`, receive at least `min_amount_out`.
    ExactIn {
        #[serde(with = "amount_serde")]
        amount_in: u128,
        #[serde(with = "amount_serde")]
        min_amount_out: u128,
    },
    /// Receive exactly `amount_out`, spend at most `max_amount_in`.
    ExactOut {
        #[serde(with = "amount_serde")]
        amount_out: u128,
        #[serde(with = "amount_serde")]
        max_amount_in: u128,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub asset_in: Asset,
    pub kind: SwapKind,
    /// Unix seconds after which the swap is refused
    #[serde(default)]
    pub deadline: Option<u64>,
}

impl SwapRequest {
    /// Exact-in swap with no slippage floor and no deadline.
    pub fn exact_in(asset_in: Asset, amount_in: u128) -> Self {
        Self {
            asset_in,
            kind: SwapKind::ExactIn {
                amount_in,
                min_amount_out: 0,
            },
            deadline: None,
        }
    }

    pub fn exact_out(asset_in: Asset, amount_out: u128, max_amount_in: u128) -> Self {
        Self {
            asset_in,
            kind: SwapKind::ExactOut {
                amount_out,
                max_amount_in,
            },
            deadline: None,
        }
    }

    pub fn with_min_out(mut self, min: u128) -> Self {
        if let SwapKind::ExactIn { min_amount_out, .. } = &mut self.kind {
            *min_amount_out = min;
        }
        self
    }

    pub fn with_deadline(mut self, deadline: u64) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    pub asset_in: Asset,
    /// Gross input pulled from the caller (fee included)
    #[serde(with = "amount_serde")]
    pub amount_in: u128,
    #[serde(with = "amount_serde")]
    pub amount_out: u128,
    #[serde(with = "amount_serde")]
    pub fee: u128,
    #[serde(with = "amount_serde")]
    pub price_impact_bps: u128,
}

/// Read-only swap preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub asset_in: Asset,
    #[serde(with = "amount_serde")]
    pub amount_in: u128,
    #[serde(with = "amount_serde")]
    pub amount_out: u128,
    #[serde(with = "amount_serde")]
    pub fee: u128,
    #[serde(with = "amount_serde")]
    pub price_impact_bps: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub holder: String,
    #[serde(with = "amount_serde")]
    pub shares: u128,
    #[serde(with = "amount_serde")]
    pub lp_supply: u128,
    /// What the shares redeem for right now
    #[serde(with = "amount_serde")]
    pub amount_a: u128,
    #[serde(with = "amount_serde")]
    pub amount_b: u128,
    /// Share of the pool, 0-10000
    #[serde(with = "amount_serde")]
    pub share_bps: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    pub address: String,
    pub symbol_a: String,
    pub symbol_b: String,
    pub lp_symbol: String,
    #[serde(with = "amount_serde")]
    pub reserve_a: u128,
    #[serde(with = "amount_serde")]
    pub reserve_b: u128,
    #[serde(with = "amount_serde")]
    pub lp_supply: u128,
    pub fee_bps: u16,
    pub last_trade: u64,
    /// B per A, 1e18 fixed point; 0 while the pool is empty
    #[serde(with = "amount_serde")]
    pub pool_price: u128,
}
