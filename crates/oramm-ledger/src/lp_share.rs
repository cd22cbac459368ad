// SPDX-License-Identifier: AGPL-3.0-only
//! # LP share ledger
//!
//! A fungible ledger whose `mint` and `burn` are gated by a one-time
//! [`MintAuthority`] capability.
//!
//! ## Authority lifecycle
//! ```text
//!  LpShareLedger::new ──► (ledger, MintAuthority)        ledger: fail-closed
//!                                  │
//!                   handed to the pool engine constructor
//!                                  │
//!  ledger.install_authority(&cap) ─┘                     ledger: mint/burn open
//!                                                        to holders of `cap` only
//! ```
//!
//! The ledger only stores a blake3 fingerprint of the capability secret, so a
//! serialized ledger cannot be used to forge the capability. Installation
//! happens once and cannot be undone or re-pointed.

use crate::error::LedgerError;
use crate::token::{AssetLedger, FungibleLedger, TokenEvent, TokenMetadata};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Capability to mint and burn LP shares.
///
/// Not `Clone`: whoever owns the value owns the authority.
#[derive(Serialize, Deserialize, PartialEq, Eq)]
pub struct MintAuthority {
    ledger: String,
    secret: String,
}

impl MintAuthority {
    fn generate(ledger: &str) -> Self {
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        Self {
            ledger: ledger.to_string(),
            secret: hex::encode(secret),
        }
    }

    /// Address of the ledger that issued this capability.
    pub fn ledger(&self) -> &str {
        &self.ledger
    }

    /// Public fingerprint stored by the ledger.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.ledger.as_bytes());
        hasher.update(b":");
        hasher.update(self.secret.as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

impl std::fmt::Debug for MintAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MintAuthority")
            .field("ledger", &self.ledger)
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LpShareLedger {
    address: String,
    shares: FungibleLedger,
    /// Fingerprint of the capability handed out at construction
    issued_authority: String,
    /// Set exactly once by `install_authority`
    installed_authority: Option<String>,
}

impl LpShareLedger {
    /// Create an empty share ledger and the capability that can unlock it.
    pub fn new(
        address: &str,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Result<(Self, MintAuthority), LedgerError> {
        crate::token::check_address(address)?;
        let shares = FungibleLedger::empty(TokenMetadata {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply: 0,
        })?;
        let authority = MintAuthority::generate(address);
        let ledger = Self {
            address: address.to_string(),
            shares,
            issued_authority: authority.fingerprint(),
            installed_authority: None,
        };
        Ok((ledger, authority))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn symbol(&self) -> String {
        self.shares.metadata.symbol.clone()
    }

    /// Bind the capability issued at construction. One-way and one-time.
    pub fn install_authority(&mut self, authority: &MintAuthority) -> Result<(), LedgerError> {
        if self.installed_authority.is_some() {
            return Err(LedgerError::AuthorityAlreadyInstalled {
                symbol: self.symbol(),
            });
        }
        let fingerprint = authority.fingerprint();
        if authority.ledger() != self.address || fingerprint != self.issued_authority {
            return Err(LedgerError::Unauthorized {
                symbol: self.symbol(),
            });
        }
        log::info!(
            "LP ledger {} authority installed ({}…)",
            self.address,
            &fingerprint[..12]
        );
        self.installed_authority = Some(fingerprint);
        Ok(())
    }

    pub fn authority_installed(&self) -> bool {
        self.installed_authority.is_some()
    }

    /// True if `authority` is the installed capability.
    pub fn is_authority(&self, authority: &MintAuthority) -> bool {
        self.installed_authority.as_deref() == Some(authority.fingerprint().as_str())
    }

    fn authorize(&self, authority: &MintAuthority) -> Result<(), LedgerError> {
        match &self.installed_authority {
            None => Err(LedgerError::AuthorityNotInstalled {
                symbol: self.symbol(),
            }),
            Some(fp) if *fp == authority.fingerprint() => Ok(()),
            Some(_) => Err(LedgerError::Unauthorized {
                symbol: self.symbol(),
            }),
        }
    }

    pub fn mint(
        &mut self,
        authority: &MintAuthority,
        to: &str,
        amount: u128,
    ) -> Result<TokenEvent, LedgerError> {
        self.authorize(authority)?;
        self.shares.mint_unchecked(to, amount)?;
        Ok(TokenEvent::Mint {
            to: to.to_string(),
            amount,
        })
    }

    pub fn burn(
        &mut self,
        authority: &MintAuthority,
        from: &str,
        amount: u128,
    ) -> Result<TokenEvent, LedgerError> {
        self.authorize(authority)?;
        self.shares.burn_unchecked(from, amount)?;
        Ok(TokenEvent::Burn {
            from: from.to_string(),
            amount,
        })
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.shares.metadata
    }

    pub fn total_supply(&self) -> u128 {
        self.shares.metadata.total_supply
    }

    pub fn balance_of(&self, holder: &str) -> u128 {
        self.shares.balance_of(holder)
    }

    pub fn allowance(&self, owner: &str, spender: &str) -> u128 {
        self.shares.allowance(owner, spender)
    }

    pub fn holders(&self) -> impl Iterator<Item = (&str, u128)> {
        self.shares.holders()
    }

    pub fn sum_of_balances(&self) -> Option<u128> {
        self.shares.sum_of_balances()
    }

    /// LP shares are ordinary fungible tokens between holders.
    pub fn transfer(&mut self, from: &str, to: &str, amount: u128) -> Result<TokenEvent, LedgerError> {
        self.shares.transfer(from, to, amount)
    }

    pub fn approve(
        &mut self,
        owner: &str,
        spender: &str,
        amount: u128,
    ) -> Result<TokenEvent, LedgerError> {
        self.shares.approve(owner, spender, amount)
    }

    pub fn transfer_from(
        &mut self,
        spender: &str,
        owner: &str,
        to: &str,
        amount: u128,
    ) -> Result<TokenEvent, LedgerError> {
        self.shares.transfer_from(spender, owner, to, amount)
    }
}
