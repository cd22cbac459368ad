// SPDX-License-Identifier: AGPL-3.0-only
//! # Pool engine
//!
//! Constant-product (x·y=k) market over two [`AssetLedger`]s with an
//! oracle-checked swap path and LP shares minted through a one-time
//! [`MintAuthority`].
//!
//! ## Execution model
//! ```text
//!   caller ──► lock ──► clone Market ──► run op on the clone ──► verify ──► commit
//!                                             │                     │
//!                                             └──── any Err ────────┴──► discard
//! ```
//! Operations are serialized by one mutex. Each runs against a staged copy of
//! the whole market (pool record and all three ledgers); the copy replaces the
//! live market only when the operation and the post-checks both succeed, so a
//! failure anywhere (ledger, oracle, invariant) leaves no trace.
//!
//! Swaps read the oracle before taking the lock; the staged swap compares
//! its own fill price against that reading.
//!
//! ## Operations
//! | Operation | Effect |
//! |-----------|--------|
//! | `add_liquidity` | pull A and B, mint shares |
//! | `remove_liquidity` | burn shares, pay out A and B |
//! | `swap` | pull one asset, pay out the other, oracle-checked |
//! | `approve` / `transfer` | ledger helpers for callers |

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::math::{self, BPS_DENOMINATOR, PRICE_DECIMALS, PRICE_SCALE};
use crate::pool::{Asset, Market, Pool, LOCKED_LIQUIDITY_HOLDER};
use crate::types::{
    AddLiquidityRequest, LiquidityAdded, LiquidityRemoved, PoolInfo, Position, Quote, RemoveAmount,
    RemoveLiquidityRequest, SwapKind, SwapOutcome, SwapRequest,
};
use oramm_ledger::{
    derive_address, AssetLedger, FungibleLedger, LpShareLedger, MintAuthority, TokenEvent,
    TokenMetadata,
};
use oramm_oracle::{deviation_bps, unix_now, OracleError, OracleReading, PriceOracle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything needed to rebuild an engine in another process.
#[derive(Debug, Serialize, Deserialize)]
pub struct EngineParts<A> {
    pub config: PoolConfig,
    pub market: Market<A>,
    #[serde(default)]
    pub journal: Vec<PoolEvent>,
    pub authority: MintAuthority,
}

struct EngineState<A> {
    market: Market<A>,
    journal: Vec<PoolEvent>,
}

pub struct PoolEngine<A: AssetLedger = FungibleLedger> {
    config: PoolConfig,
    /// Fixed at construction; readable without the lock
    address: String,
    state: Mutex<EngineState<A>>,
    oracle: Arc<dyn PriceOracle>,
    authority: MintAuthority,
}

impl<A: AssetLedger> fmt::Debug for PoolEngine<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolEngine")
            .field("address", &self.address)
            .field("config", &self.config)
            .field("authority", &self.authority)
            .finish_non_exhaustive()
    }
}

fn check_caller(pool: &Pool, caller: &str) -> Result<(), PoolError> {
    if caller == pool.address || caller == LOCKED_LIQUIDITY_HOLDER {
        return Err(PoolError::ReservedAddress(caller.to_string()));
    }
    Ok(())
}

impl<A: AssetLedger> PoolEngine<A> {
    /// Build a pool over two asset ledgers and a fresh LP ledger.
    ///
    /// `lp` must have no supply and no installed authority; `authority` must
    /// be the capability issued with it. The pool address is derived from the
    /// LP ledger address and must not hold any asset yet.
    pub fn new(
        config: PoolConfig,
        asset_a: A,
        asset_b: A,
        mut lp: LpShareLedger,
        authority: MintAuthority,
        oracle: Arc<dyn PriceOracle>,
    ) -> Result<Self, PoolError> {
        config.validate().map_err(PoolError::InvalidConfig)?;
        if lp.total_supply() != 0 {
            return Err(PoolError::AuthorityMismatch(format!(
                "LP ledger {} already has {} shares issued",
                lp.address(),
                lp.total_supply()
            )));
        }
        lp.install_authority(&authority)?;

        let address = derive_address("pool", lp.address());
        let market = Market {
            pool: Pool::new(address.clone(), config.fee_bps),
            asset_a,
            asset_b,
            lp,
        };
        market.verify_invariants()?;

        log::info!(
            "pool {} created: {}/{} fee {} bps, LP {}",
            address,
            market.asset_a.metadata().symbol,
            market.asset_b.metadata().symbol,
            config.fee_bps,
            market.lp.metadata().symbol
        );

        Ok(Self {
            config,
            address,
            state: Mutex::new(EngineState {
                market,
                journal: Vec::new(),
            }),
            oracle,
            authority,
        })
    }

    /// Rebuild an engine from persisted parts. The authority must be the one
    /// installed on the LP ledger.
    pub fn from_parts(parts: EngineParts<A>, oracle: Arc<dyn PriceOracle>) -> Result<Self, PoolError> {
        let EngineParts {
            config,
            market,
            journal,
            authority,
        } = parts;
        config.validate().map_err(PoolError::InvalidConfig)?;
        if market.pool.fee_bps != config.fee_bps {
            return Err(PoolError::InvalidConfig(format!(
                "fee_bps {} does not match the pool's {}",
                config.fee_bps, market.pool.fee_bps
            )));
        }
        if !market.lp.is_authority(&authority) {
            return Err(PoolError::AuthorityMismatch(format!(
                "{:?} is not installed on {}",
                authority,
                market.lp.address()
            )));
        }
        market.verify_invariants()?;

        Ok(Self {
            config,
            address: market.pool.address.clone(),
            state: Mutex::new(EngineState { market, journal }),
            oracle,
            authority,
        })
    }

    pub fn into_parts(self) -> Result<EngineParts<A>, PoolError> {
        let state = self.state.into_inner().map_err(|_| PoolError::LockPoisoned)?;
        Ok(EngineParts {
            config: self.config,
            market: state.market,
            journal: state.journal,
            authority: self.authority,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, EngineState<A>>, PoolError> {
        self.state.lock().map_err(|_| PoolError::LockPoisoned)
    }

    /// Run `op` against a staged copy of the market and commit it only if
    /// both `op` and the invariant checks succeed.
    fn transact<T>(
        &self,
        name: &str,
        op: impl FnOnce(&mut Market<A>, &mut Vec<PoolEvent>) -> Result<T, PoolError>,
    ) -> Result<T, PoolError> {
        let mut state = self.lock()?;
        let mut staged = state.market.clone();
        let mut events = Vec::new();

        let result = op(&mut staged, &mut events).and_then(|value| {
            staged.verify_invariants()?;
            Ok(value)
        });

        match result {
            Ok(value) => {
                state.market = staged;
                state.journal.extend(events);
                Ok(value)
            }
            Err(e) => {
                log::warn!("pool {}: {} rejected: {}", self.address, name, e);
                Err(e)
            }
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Market<A>) -> T) -> Result<T, PoolError> {
        let state = self.lock()?;
        Ok(f(&state.market))
    }

    // ─────────────────────────────────────────────────────────────
    // LIQUIDITY
    // ─────────────────────────────────────────────────────────────

    pub fn add_liquidity(&self, caller: &str, amount_a: u128, amount_b: u128) -> Result<LiquidityAdded, PoolError> {
        self.add_liquidity_with(caller, AddLiquidityRequest::new(amount_a, amount_b))
    }

    /// Deposit both assets for LP shares.
    ///
    /// The first deposit sets the ratio and mints `isqrt(a·b)` (less any
    /// locked minimum). Later deposits mint
    /// `min(a·S/Ra, b·S/Rb)` and pull only the ratio-matched amounts,
    /// rounded up; the rest is reported as a refund and never leaves the
    /// caller.
    pub fn add_liquidity_with(
        &self,
        caller: &str,
        req: AddLiquidityRequest,
    ) -> Result<LiquidityAdded, PoolError> {
        let added = self.transact("add_liquidity", |m, journal| {
            check_caller(&m.pool, caller)?;

            let supply = m.pool.lp_supply;
            let (shares, locked, used_a, used_b) = if m.pool.is_empty() {
                if req.amount_a == 0 || req.amount_b == 0 {
                    return Err(PoolError::InvalidInitialDeposit);
                }
                let minted = math::sqrt_product(req.amount_a, req.amount_b);
                let minimum = self.config.minimum_liquidity;
                if minimum > 0 && minted <= minimum {
                    return Err(PoolError::InitialLiquidityTooSmall { minted, minimum });
                }
                (minted - minimum, minimum, req.amount_a, req.amount_b)
            } else {
                if req.amount_a == 0 || req.amount_b == 0 {
                    return Err(PoolError::ZeroAmount);
                }
                let (ra, rb) = (m.pool.reserve_a, m.pool.reserve_b);
                let from_a = math::mul_div(req.amount_a, supply, ra)?;
                let from_b = math::mul_div(req.amount_b, supply, rb)?;
                let shares = from_a.min(from_b);
                if shares == 0 {
                    return Err(PoolError::ZeroLiquidityMint);
                }
                // Rounded up: the depositor pays for the fractional share.
                let used_a = math::mul_div_ceil(shares, ra, supply)?;
                let used_b = math::mul_div_ceil(shares, rb, supply)?;
                (shares, 0, used_a, used_b)
            };

            if shares < req.min_shares {
                return Err(PoolError::SlippageExceeded(format!(
                    "would mint {} shares but minimum is {}",
                    shares, req.min_shares
                )));
            }

            // Effects
            m.pool.credit(Asset::A, used_a)?;
            m.pool.credit(Asset::B, used_b)?;
            m.pool.lp_supply = shares
                .checked_add(locked)
                .and_then(|minted| supply.checked_add(minted))
                .ok_or(math::MathError::Overflow)?;

            // Interactions
            let pool = m.pool.address.clone();
            m.asset_a.transfer_from(&pool, caller, &pool, used_a)?;
            m.asset_b.transfer_from(&pool, caller, &pool, used_b)?;
            if locked > 0 {
                m.lp.mint(&self.authority, LOCKED_LIQUIDITY_HOLDER, locked)?;
            }
            m.lp.mint(&self.authority, caller, shares)?;

            journal.push(PoolEvent::LiquidityAdded {
                provider: caller.to_string(),
                amount_a: used_a,
                amount_b: used_b,
                shares,
                timestamp: unix_now(),
            });

            Ok(LiquidityAdded {
                shares,
                amount_a: used_a,
                amount_b: used_b,
                refund_a: req.amount_a - used_a,
                refund_b: req.amount_b - used_b,
            })
        })?;

        log::info!(
            "pool {}: {} added {} A + {} B for {} shares",
            self.address,
            caller,
            added.amount_a,
            added.amount_b,
            added.shares
        );
        Ok(added)
    }

    pub fn remove_liquidity(&self, caller: &str, amount: RemoveAmount) -> Result<LiquidityRemoved, PoolError> {
        self.remove_liquidity_with(caller, amount.into())
    }

    /// Burn shares for a proportional slice of both reserves, rounded down.
    pub fn remove_liquidity_with(
        &self,
        caller: &str,
        req: RemoveLiquidityRequest,
    ) -> Result<LiquidityRemoved, PoolError> {
        let removed = self.transact("remove_liquidity", |m, journal| {
            check_caller(&m.pool, caller)?;

            let balance = m.lp.balance_of(caller);
            let shares = match req.amount {
                RemoveAmount::Shares(n) => n,
                RemoveAmount::Percent(p) => {
                    if p == 0 || p > 100 {
                        return Err(PoolError::InvalidPercentage(p));
                    }
                    math::mul_div(p as u128, balance, 100)?
                }
            };
            if shares == 0 {
                return Err(PoolError::ZeroAmount);
            }

            let supply = m.pool.lp_supply;
            if supply == 0 {
                return Err(PoolError::EmptyPool);
            }
            if balance < shares {
                return Err(PoolError::InsufficientLpBalance {
                    have: balance,
                    need: shares,
                });
            }

            let amount_a = math::mul_div(m.pool.reserve_a, shares, supply)?;
            let amount_b = math::mul_div(m.pool.reserve_b, shares, supply)?;
            if amount_a == 0 || amount_b == 0 {
                return Err(PoolError::ZeroWithdrawal);
            }
            if amount_a < req.min_amount_a || amount_b < req.min_amount_b {
                return Err(PoolError::SlippageExceeded(format!(
                    "would receive ({}, {}) but minimum is ({}, {})",
                    amount_a, amount_b, req.min_amount_a, req.min_amount_b
                )));
            }

            // Effects
            m.pool.debit(Asset::A, amount_a)?;
            m.pool.debit(Asset::B, amount_b)?;
            m.pool.lp_supply = supply - shares;

            // Interactions
            let pool = m.pool.address.clone();
            m.lp.burn(&self.authority, caller, shares)?;
            m.asset_a.transfer(&pool, caller, amount_a)?;
            m.asset_b.transfer(&pool, caller, amount_b)?;

            journal.push(PoolEvent::LiquidityRemoved {
                provider: caller.to_string(),
                amount_a,
                amount_b,
                shares,
                timestamp: unix_now(),
            });

            Ok(LiquidityRemoved {
                shares,
                amount_a,
                amount_b,
            })
        })?;

        log::info!(
            "pool {}: {} burned {} shares for {} A + {} B",
            self.address,
            caller,
            removed.shares,
            removed.amount_a,
            removed.amount_b
        );
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────
    // SWAP
    // ─────────────────────────────────────────────────────────────

    /// Exact-in swap of `amount_in` units of `asset_in` with no output floor.
    pub fn swap(&self, caller: &str, asset_in: Asset, amount_in: u128) -> Result<SwapOutcome, PoolError> {
        self.swap_with(caller, SwapRequest::exact_in(asset_in, amount_in))
    }

    pub fn swap_with(&self, caller: &str, req: SwapRequest) -> Result<SwapOutcome, PoolError> {
        // The oracle is external code: read it before taking the engine lock.
        let reading = self.config.oracle.enabled.then(|| self.oracle.latest_price());
        let now = unix_now();
        let outcome = self.transact("swap", |m, journal| {
            check_caller(&m.pool, caller)?;
            match req.kind {
                SwapKind::ExactIn { amount_in: 0, .. } => return Err(PoolError::ZeroInput),
                SwapKind::ExactOut { amount_out: 0, .. } => return Err(PoolError::ZeroOutput),
                _ => {}
            }

            if let Some(deadline) = req.deadline {
                if now > deadline {
                    return Err(PoolError::DeadlineExpired { deadline, now });
                }
            }
            if !m.pool.is_liquid() {
                return Err(PoolError::EmptyPool);
            }

            let asset_out = req.asset_in.other();
            let fee_bps = m.pool.fee_bps;
            let (reserve_in, reserve_out) = m.pool.reserves_for(req.asset_in);

            let (gross, amount_out) = match req.kind {
                SwapKind::ExactIn {
                    amount_in,
                    min_amount_out,
                } => {
                    let (net, _) = math::apply_fee(amount_in, fee_bps)?;
                    let out = math::constant_product_out(net, reserve_in, reserve_out)?;
                    if out == 0 {
                        return Err(PoolError::ZeroOutput);
                    }
                    if out >= reserve_out {
                        return Err(PoolError::InsufficientOutputReserve {
                            requested: out,
                            reserve: reserve_out,
                        });
                    }
                    if out < min_amount_out {
                        return Err(PoolError::SlippageExceeded(format!(
                            "output {} < minimum {}",
                            out, min_amount_out
                        )));
                    }
                    (amount_in, out)
                }
                SwapKind::ExactOut {
                    amount_out,
                    max_amount_in,
                } => {
                    if amount_out >= reserve_out {
                        return Err(PoolError::InsufficientOutputReserve {
                            requested: amount_out,
                            reserve: reserve_out,
                        });
                    }
                    let net = math::constant_product_in(amount_out, reserve_in, reserve_out)?;
                    let gross = math::gross_for_net(net, fee_bps)?;
                    if gross > max_amount_in {
                        return Err(PoolError::SlippageExceeded(format!(
                            "input {} > maximum {}",
                            gross, max_amount_in
                        )));
                    }
                    (gross, amount_out)
                }
            };
            let (_, fee) = math::apply_fee(gross, fee_bps)?;

            // Effects: the whole gross input (fee included) stays in the pool.
            let k_before = m.pool.k();
            m.pool.credit(req.asset_in, gross)?;
            m.pool.debit(asset_out, amount_out)?;
            let k_after = m.pool.k();
            if k_after < k_before || (fee > 0 && k_after == k_before) {
                return Err(PoolError::InvariantViolation(format!(
                    "constant product would not grow: {} -> {}",
                    k_before, k_after
                )));
            }
            let (amount_a, amount_b) = match req.asset_in {
                Asset::A => (gross, amount_out),
                Asset::B => (amount_out, gross),
            };
            self.check_oracle(m, reading.as_ref(), amount_a, amount_b, now)?;
            m.pool.last_trade = now;

            // Interactions
            let pool = m.pool.address.clone();
            m.ledger_mut(req.asset_in)
                .transfer_from(&pool, caller, &pool, gross)?;
            m.ledger_mut(asset_out).transfer(&pool, caller, amount_out)?;

            journal.push(PoolEvent::Swap {
                trader: caller.to_string(),
                asset_in: req.asset_in,
                amount_in: gross,
                amount_out,
                fee,
                timestamp: now,
            });

            Ok(SwapOutcome {
                asset_in: req.asset_in,
                amount_in: gross,
                amount_out,
                fee,
                price_impact_bps: math::price_impact_bps(amount_out, reserve_out)?,
            })
        })?;

        log::info!(
            "pool {}: {} swapped {} {} -> {} {} (fee {})",
            self.address,
            caller,
            outcome.amount_in,
            outcome.asset_in,
            outcome.amount_out,
            outcome.asset_in.other(),
            outcome.fee
        );
        Ok(outcome)
    }

    /// Compare the trade's execution price (B per whole A) with the oracle
    /// reading taken before the lock. `None` means the guard is off.
    fn check_oracle(
        &self,
        m: &Market<A>,
        reading: Option<&Result<OracleReading, OracleError>>,
        amount_a: u128,
        amount_b: u128,
        now: u64,
    ) -> Result<(), PoolError> {
        let Some(reading) = reading else {
            return Ok(());
        };
        let guard = &self.config.oracle;
        let reading = reading.clone()?;
        reading.check_fresh(now, guard.max_age_secs)?;
        let oracle_price = reading.scaled_to(PRICE_DECIMALS)?;
        let execution_price = math::whole_unit_price(
            amount_a,
            amount_b,
            m.asset_a.metadata().decimals,
            m.asset_b.metadata().decimals,
        )?;
        let deviation =
            deviation_bps(execution_price, oracle_price).ok_or(OracleError::ZeroPrice)?;
        log::debug!(
            "pool {}: execution price {} vs oracle {} ({} bps)",
            self.address,
            execution_price,
            oracle_price,
            deviation
        );

        if deviation > guard.max_deviation_bps as u128 {
            return Err(PoolError::PriceDeviationExceeded {
                execution_price,
                oracle_price,
                deviation_bps: deviation,
                max_bps: guard.max_deviation_bps,
            });
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // LEDGER HELPERS
    // ─────────────────────────────────────────────────────────────

    /// Set the allowance `caller` grants `spender` on one asset ledger.
    pub fn approve(&self, caller: &str, asset: Asset, spender: &str, amount: u128) -> Result<TokenEvent, PoolError> {
        self.transact("approve", |m, _| {
            check_caller(&m.pool, caller)?;
            Ok(m.ledger_mut(asset).approve(caller, spender, amount)?)
        })
    }

    /// Move `caller`'s own asset balance. The pool address is not a valid
    /// destination: reserves only grow through pool operations.
    pub fn transfer(&self, caller: &str, asset: Asset, to: &str, amount: u128) -> Result<TokenEvent, PoolError> {
        self.transact("transfer", |m, _| {
            check_caller(&m.pool, caller)?;
            if to == m.pool.address {
                return Err(PoolError::DirectTransferToPool(to.to_string()));
            }
            Ok(m.ledger_mut(asset).transfer(caller, to, amount)?)
        })
    }

    /// Move LP shares between holders.
    pub fn transfer_shares(&self, caller: &str, to: &str, amount: u128) -> Result<TokenEvent, PoolError> {
        self.transact("transfer_shares", |m, _| {
            check_caller(&m.pool, caller)?;
            Ok(m.lp.transfer(caller, to, amount)?)
        })
    }

    // ─────────────────────────────────────────────────────────────
    // VIEWS
    // ─────────────────────────────────────────────────────────────

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Pool price of one atomic unit of A in atomic units of B, 1e18 fixed point.
    pub fn pool_price(&self) -> Result<u128, PoolError> {
        let (ra, rb) = self.reserves()?;
        if ra == 0 || rb == 0 {
            return Err(PoolError::EmptyPool);
        }
        Ok(math::mul_div(rb, PRICE_SCALE, ra)?)
    }

    /// The oracle's latest reading, unvalidated.
    pub fn price_from_oracle(&self) -> Result<OracleReading, PoolError> {
        Ok(self.oracle.latest_price()?)
    }

    /// Preview an exact-in swap. No state change, no oracle call.
    pub fn quote(&self, asset_in: Asset, amount_in: u128) -> Result<Quote, PoolError> {
        if amount_in == 0 {
            return Err(PoolError::ZeroInput);
        }
        let pool = self.read(|m| m.pool.clone())?;
        if !pool.is_liquid() {
            return Err(PoolError::EmptyPool);
        }
        let (reserve_in, reserve_out) = pool.reserves_for(asset_in);
        let (net, fee) = math::apply_fee(amount_in, pool.fee_bps)?;
        let amount_out = math::constant_product_out(net, reserve_in, reserve_out)?;
        log::debug!("quote {} {} -> {}", amount_in, asset_in, amount_out);
        Ok(Quote {
            asset_in,
            amount_in,
            amount_out,
            fee,
            price_impact_bps: math::price_impact_bps(amount_out, reserve_out)?,
        })
    }

    pub fn position(&self, holder: &str) -> Result<Position, PoolError> {
        let (pool, shares) = self.read(|m| (m.pool.clone(), m.lp.balance_of(holder)))?;
        let supply = pool.lp_supply;
        let (amount_a, amount_b, share_bps) = if supply == 0 {
            (0, 0, 0)
        } else {
            (
                math::mul_div(pool.reserve_a, shares, supply)?,
                math::mul_div(pool.reserve_b, shares, supply)?,
                math::mul_div(shares, BPS_DENOMINATOR, supply)?,
            )
        };
        Ok(Position {
            holder: holder.to_string(),
            shares,
            lp_supply: supply,
            amount_a,
            amount_b,
            share_bps,
        })
    }

    pub fn info(&self) -> Result<PoolInfo, PoolError> {
        let info = self.read(|m| PoolInfo {
            address: m.pool.address.clone(),
            symbol_a: m.asset_a.metadata().symbol.clone(),
            symbol_b: m.asset_b.metadata().symbol.clone(),
            lp_symbol: m.lp.metadata().symbol.clone(),
            reserve_a: m.pool.reserve_a,
            reserve_b: m.pool.reserve_b,
            lp_supply: m.pool.lp_supply,
            fee_bps: m.pool.fee_bps,
            last_trade: m.pool.last_trade,
            pool_price: 0,
        })?;
        let pool_price = match self.pool_price() {
            Ok(p) => p,
            Err(PoolError::EmptyPool) => 0,
            Err(e) => return Err(e),
        };
        Ok(PoolInfo { pool_price, ..info })
    }

    pub fn reserves(&self) -> Result<(u128, u128), PoolError> {
        self.read(|m| (m.pool.reserve_a, m.pool.reserve_b))
    }

    pub fn lp_total_supply(&self) -> Result<u128, PoolError> {
        self.read(|m| m.lp.total_supply())
    }

    pub fn lp_balance_of(&self, holder: &str) -> Result<u128, PoolError> {
        self.read(|m| m.lp.balance_of(holder))
    }

    pub fn balance_of(&self, asset: Asset, holder: &str) -> Result<u128, PoolError> {
        self.read(|m| m.ledger(asset).balance_of(holder))
    }

    pub fn allowance(&self, asset: Asset, owner: &str, spender: &str) -> Result<u128, PoolError> {
        self.read(|m| m.ledger(asset).allowance(owner, spender))
    }

    pub fn metadata(&self, asset: Asset) -> Result<TokenMetadata, PoolError> {
        self.read(|m| m.ledger(asset).metadata().clone())
    }

    pub fn lp_metadata(&self) -> Result<TokenMetadata, PoolError> {
        self.read(|m| m.lp.metadata().clone())
    }

    /// The committed journal, oldest first.
    pub fn events(&self) -> Result<Vec<PoolEvent>, PoolError> {
        Ok(self.lock()?.journal.clone())
    }

    /// Copy of the committed market.
    pub fn market(&self) -> Result<Market<A>, PoolError> {
        self.read(|m| m.clone())
    }
}
