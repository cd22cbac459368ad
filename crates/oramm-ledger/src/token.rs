// SPDX-License-Identifier: AGPL-3.0-only
//! # Fungible asset ledger
//!
//! Balance and allowance bookkeeping for the two pool assets (and, wrapped by
//! [`LpShareLedger`](crate::LpShareLedger), for LP shares).
//!
//! ## Features
//! - Fixed supply credited to the creator at construction
//! - Transfer, Approve, TransferFrom (ERC-20-like)
//! - All amounts in atomic units (`u128`), no floating point
//! - Checked arithmetic everywhere: shortfalls are errors, never saturation
//!
//! ## State
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  FungibleLedger                                     │
//! │  ┌──────────┐  ┌──────────┐  ┌──────────────────┐  │
//! │  │ Metadata  │  │ Balances │  │ Allowances       │  │
//! │  │ name      │  │ addr→u128│  │ "owner:spender"  │  │
//! │  │ symbol    │  │          │  │   →u128          │  │
//! │  │ decimals  │  │          │  │                  │  │
//! │  │ supply    │  │          │  │                  │  │
//! │  └──────────┘  └──────────┘  └──────────────────┘  │
//! └─────────────────────────────────────────────────────┘
//! ```

use crate::amount_serde;
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Largest supported `decimals` value.
pub const MAX_DECIMALS: u8 = 18;

// ─────────────────────────────────────────────────────────────
// TOKEN METADATA
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Human-readable name (e.g. "Token A")
    pub name: String,
    /// Ticker symbol, max 8 characters
    pub symbol: String,
    /// Decimal places used for display
    pub decimals: u8,
    /// Total supply in atomic units
    #[serde(with = "amount_serde")]
    pub total_supply: u128,
}

impl TokenMetadata {
    /// Validate metadata fields. A zero supply is allowed here; ledgers that
    /// require an initial supply check it themselves.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.name.is_empty() || self.name.len() > 64 {
            return Err(LedgerError::InvalidMetadata(
                "name must be 1-64 characters".to_string(),
            ));
        }
        if self.symbol.is_empty() || self.symbol.len() > 8 {
            return Err(LedgerError::InvalidMetadata(
                "symbol must be 1-8 characters".to_string(),
            ));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(LedgerError::InvalidMetadata(format!(
                "decimals must be 0-{}",
                MAX_DECIMALS
            )));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
// EVENTS
// ─────────────────────────────────────────────────────────────

/// Events emitted by ledger mutations, returned to the caller for indexing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum TokenEvent {
    Transfer {
        from: String,
        to: String,
        #[serde(with = "amount_serde")]
        amount: u128,
    },
    Approval {
        owner: String,
        spender: String,
        #[serde(with = "amount_serde")]
        amount: u128,
    },
    Mint {
        to: String,
        #[serde(with = "amount_serde")]
        amount: u128,
    },
    Burn {
        from: String,
        #[serde(with = "amount_serde")]
        amount: u128,
    },
}

// ─────────────────────────────────────────────────────────────
// LEDGER INTERFACE (consumed by the pool engine)
// ─────────────────────────────────────────────────────────────

/// The asset-ledger surface the pool engine relies on.
///
/// Implementations must be all-or-nothing per call: an `Err` means no balance
/// or allowance changed. The engine still treats implementations as
/// untrusted and re-checks balances after every operation.
pub trait AssetLedger: Clone + Send {
    fn metadata(&self) -> &TokenMetadata;

    fn balance_of(&self, holder: &str) -> u128;

    fn allowance(&self, owner: &str, spender: &str) -> u128;

    fn total_supply(&self) -> u128 {
        self.metadata().total_supply
    }

    /// Move `amount` from `from` to `to` on `from`'s own instruction.
    fn transfer(&mut self, from: &str, to: &str, amount: u128) -> Result<TokenEvent, LedgerError>;

    /// Set (overwrite) the allowance `owner` grants `spender`.
    fn approve(&mut self, owner: &str, spender: &str, amount: u128)
        -> Result<TokenEvent, LedgerError>;

    /// Move `amount` from `owner` to `to`, spending `spender`'s allowance.
    fn transfer_from(
        &mut self,
        spender: &str,
        owner: &str,
        to: &str,
        amount: u128,
    ) -> Result<TokenEvent, LedgerError>;
}

pub(crate) fn check_address(addr: &str) -> Result<(), LedgerError> {
    if addr.is_empty() || addr.contains(':') {
        return Err(LedgerError::InvalidAddress(addr.to_string()));
    }
    Ok(())
}

/// State key for an allowance entry: `{owner}:{spender}`.
pub fn allowance_key(owner: &str, spender: &str) -> String {
    format!("{}:{}", owner, spender)
}

// ─────────────────────────────────────────────────────────────
// IN-PROCESS IMPLEMENTATION
// ─────────────────────────────────────────────────────────────

/// In-memory fungible token state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FungibleLedger {
    pub metadata: TokenMetadata,
    /// BTreeMap keeps serialized snapshots deterministic
    #[serde(with = "amount_serde::map")]
    balances: BTreeMap<String, u128>,
    /// `allowance_key(owner, spender)` → remaining allowance
    #[serde(with = "amount_serde::map")]
    allowances: BTreeMap<String, u128>,
}

impl FungibleLedger {
    /// Create a token with `initial_supply` credited to `creator`.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        initial_supply: u128,
        creator: &str,
    ) -> Result<Self, LedgerError> {
        let metadata = TokenMetadata {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply: initial_supply,
        };
        metadata.validate()?;
        if initial_supply == 0 {
            return Err(LedgerError::InvalidMetadata(
                "initial supply must be > 0".to_string(),
            ));
        }
        check_address(creator)?;

        let mut balances = BTreeMap::new();
        balances.insert(creator.to_string(), initial_supply);

        Ok(Self {
            metadata,
            balances,
            allowances: BTreeMap::new(),
        })
    }

    /// Create a ledger with no supply; balances only appear through `credit`.
    pub(crate) fn empty(metadata: TokenMetadata) -> Result<Self, LedgerError> {
        metadata.validate()?;
        Ok(Self {
            metadata: TokenMetadata {
                total_supply: 0,
                ..metadata
            },
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        })
    }

    /// All holders with an entry, including zero balances.
    pub fn holders(&self) -> impl Iterator<Item = (&str, u128)> {
        self.balances.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum of every recorded balance. Equal to `total_supply` for a
    /// consistent ledger.
    pub fn sum_of_balances(&self) -> Option<u128> {
        self.balances
            .values()
            .try_fold(0u128, |acc, b| acc.checked_add(*b))
    }

    fn debit(&mut self, holder: &str, amount: u128) -> Result<(), LedgerError> {
        let have = self.balance_of(holder);
        let remaining = have
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientBalance {
                holder: holder.to_string(),
                have,
                need: amount,
            })?;
        // Zero balances stay recorded: an emptied position is still a position.
        self.balances.insert(holder.to_string(), remaining);
        Ok(())
    }

    fn credit(&mut self, holder: &str, amount: u128) -> Result<(), LedgerError> {
        let updated = self
            .balance_of(holder)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("credit"))?;
        self.balances.insert(holder.to_string(), updated);
        Ok(())
    }

    fn move_balance(&mut self, from: &str, to: &str, amount: u128) -> Result<(), LedgerError> {
        // Check the credit side first so a failing credit never follows a debit.
        if from != to {
            self.balance_of(to)
                .checked_add(amount)
                .ok_or(LedgerError::Overflow("transfer"))?;
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    /// Create `amount` new units for `to`, growing the supply.
    pub(crate) fn mint_unchecked(&mut self, to: &str, amount: u128) -> Result<(), LedgerError> {
        check_address(to)?;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let supply = self
            .metadata
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("mint"))?;
        self.credit(to, amount)?;
        self.metadata.total_supply = supply;
        Ok(())
    }

    /// Destroy `amount` units held by `from`, shrinking the supply.
    pub(crate) fn burn_unchecked(&mut self, from: &str, amount: u128) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        self.debit(from, amount)?;
        self.metadata.total_supply = self
            .metadata
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow("burn"))?;
        Ok(())
    }
}

impl AssetLedger for FungibleLedger {
    fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    fn balance_of(&self, holder: &str) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &str, spender: &str) -> u128 {
        self.allowances
            .get(&allowance_key(owner, spender))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(&mut self, from: &str, to: &str, amount: u128) -> Result<TokenEvent, LedgerError> {
        check_address(from)?;
        check_address(to)?;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        self.move_balance(from, to, amount)?;
        Ok(TokenEvent::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        })
    }

    fn approve(
        &mut self,
        owner: &str,
        spender: &str,
        amount: u128,
    ) -> Result<TokenEvent, LedgerError> {
        check_address(owner)?;
        check_address(spender)?;
        self.allowances.insert(allowance_key(owner, spender), amount);
        Ok(TokenEvent::Approval {
            owner: owner.to_string(),
            spender: spender.to_string(),
            amount,
        })
    }

    fn transfer_from(
        &mut self,
        spender: &str,
        owner: &str,
        to: &str,
        amount: u128,
    ) -> Result<TokenEvent, LedgerError> {
        check_address(spender)?;
        check_address(owner)?;
        check_address(to)?;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let allowance = self.allowance(owner, spender);
        let remaining = allowance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientAllowance {
                owner: owner.to_string(),
                spender: spender.to_string(),
                have: allowance,
                need: amount,
            })?;
        self.move_balance(owner, to, amount)?;
        self.allowances.insert(allowance_key(owner, spender), remaining);
        Ok(TokenEvent::Transfer {
            from: owner.to_string(),
            to: to.to_string(),
            amount,
        })
    }
}

// ─────────────────────────────────────────────────────────────
// TESTS
// ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> FungibleLedger {
        FungibleLedger::new("Token A", "TKA", 18, 10_000, "alice").unwrap()
    }

    #[test]
    fn test_creator_receives_supply() {
        let t = token();
        assert_eq!(t.balance_of("alice"), 10_000);
        assert_eq!(t.total_supply(), 10_000);
    }

    #[test]
    fn test_metadata_validation() {
        assert!(FungibleLedger::new("", "X", 18, 1, "a").is_err());
        assert!(FungibleLedger::new("X", "TOOLONGSYM", 18, 1, "a").is_err());
        assert!(FungibleLedger::new("X", "X", 19, 1, "a").is_err());
        assert!(FungibleLedger::new("X", "X", 18, 0, "a").is_err());
        assert!(FungibleLedger::new("X", "X", 18, 1, "").is_err());
    }

    #[test]
    fn test_transfer_moves_balance() {
        let mut t = token();
        let ev = t.transfer("alice", "bob", 400).unwrap();
        assert_eq!(
            ev,
            TokenEvent::Transfer {
                from: "alice".into(),
                to: "bob".into(),
                amount: 400
            }
        );
        assert_eq!(t.balance_of("alice"), 9_600);
        assert_eq!(t.balance_of("bob"), 400);
        assert_eq!(t.sum_of_balances(), Some(10_000));
    }

    #[test]
    fn test_transfer_insufficient_balance_changes_nothing() {
        let mut t = token();
        let before = t.clone();
        let err = t.transfer("bob", "alice", 1).unwrap_err();
        assert!(err.is_insufficient_funds());
        assert_eq!(t, before);
    }

    #[test]
    fn test_zero_transfer_rejected() {
        let mut t = token();
        assert_eq!(t.transfer("alice", "bob", 0), Err(LedgerError::ZeroAmount));
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let mut t = token();
        t.transfer("alice", "alice", 500).unwrap();
        assert_eq!(t.balance_of("alice"), 10_000);
    }

    #[test]
    fn test_address_with_separator_rejected() {
        let mut t = token();
        assert!(matches!(
            t.transfer("alice", "bo:b", 1),
            Err(LedgerError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let mut t = token();
        t.approve("alice", "pool", 1_000).unwrap();
        t.transfer_from("pool", "alice", "pool", 600).unwrap();
        assert_eq!(t.allowance("alice", "pool"), 400);
        assert_eq!(t.balance_of("pool"), 600);
    }

    #[test]
    fn test_transfer_from_without_allowance() {
        let mut t = token();
        let err = t.transfer_from("pool", "alice", "pool", 1).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { have: 0, need: 1, .. }));
    }

    #[test]
    fn test_transfer_from_balance_shortfall_keeps_allowance() {
        let mut t = token();
        t.transfer("alice", "bob", 100).unwrap();
        t.approve("bob", "pool", 1_000).unwrap();
        let err = t.transfer_from("pool", "bob", "pool", 500).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { have: 100, .. }));
        assert_eq!(t.allowance("bob", "pool"), 1_000);
    }

    #[test]
    fn test_approve_overwrites() {
        let mut t = token();
        t.approve("alice", "pool", 10).unwrap();
        t.approve("alice", "pool", 3).unwrap();
        assert_eq!(t.allowance("alice", "pool"), 3);
    }

    #[test]
    fn test_emptied_holder_stays_recorded() {
        let mut t = token();
        t.transfer("alice", "bob", 10_000).unwrap();
        let holders: Vec<_> = t.holders().collect();
        assert!(holders.contains(&("alice", 0)));
    }

    #[test]
    fn test_mint_and_burn_track_supply() {
        let mut t = token();
        t.mint_unchecked("carol", 50).unwrap();
        assert_eq!(t.total_supply(), 10_050);
        t.burn_unchecked("carol", 20).unwrap();
        assert_eq!(t.total_supply(), 10_030);
        assert_eq!(t.sum_of_balances(), Some(10_030));
    }

    #[test]
    fn test_mint_overflow_rejected() {
        let mut t = FungibleLedger::new("Big", "BIG", 0, u128::MAX, "alice").unwrap();
        assert_eq!(t.mint_unchecked("bob", 1), Err(LedgerError::Overflow("mint")));
        assert_eq!(t.balance_of("bob"), 0);
    }

    #[test]
    fn test_json_roundtrip_keeps_state() {
        let mut t = token();
        t.approve("alice", "pool", 77).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        let back: FungibleLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(json.contains(r#""alice:pool":"77""#));
    }
}
