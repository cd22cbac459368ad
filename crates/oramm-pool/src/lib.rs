// SPDX-License-Identifier: AGPL-3.0-only
//! # oramm pool
//!
//! Two-asset constant-product market maker whose swaps are sanity-checked
//! against an external price oracle.
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`PoolEngine`]: liquidity, swaps, views |
//! | [`pool`] | [`Pool`] record and the staged [`Market`] |
//! | [`math`] | integer/U256 curve, fee and price math |
//! | [`config`] | [`PoolConfig`] (TOML) |
//! | [`deployment`] | [`deploy`] + [`DeploymentRecord`] |
//!
//! All amounts are `u128` atomic units; prices are 1e18 fixed point.

pub mod config;
pub mod deployment;
pub mod engine;
pub mod error;
pub mod events;
pub mod math;
pub mod pool;
pub mod types;

pub use config::{ConfigError, OracleGuardConfig, PoolConfig, DEFAULT_FEE_BPS, MAX_FEE_BPS};
pub use deployment::{deploy, seed, DeployConfig, Deployment, DeploymentRecord, MockOracleSpec};
pub use engine::{EngineParts, PoolEngine};
pub use error::{ErrorKind, PoolError};
pub use events::PoolEvent;
pub use math::{PRICE_DECIMALS, PRICE_SCALE};
pub use pool::{Asset, Market, Pool, LOCKED_LIQUIDITY_HOLDER};
pub use types::{
    AddLiquidityRequest, LiquidityAdded, LiquidityRemoved, PoolInfo, Position, Quote, RemoveAmount,
    RemoveLiquidityRequest, SwapKind, SwapOutcome, SwapRequest,
};
