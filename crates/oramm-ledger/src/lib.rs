// SPDX-License-Identifier: AGPL-3.0-only
//! # oramm ledgers
//!
//! Token bookkeeping used by the oramm pool engine.
//!
//! | Type | Role |
//! |------|------|
//! | [`FungibleLedger`] | Asset A / Asset B balances and allowances |
//! | [`AssetLedger`] | The ledger surface the pool engine consumes |
//! | [`LpShareLedger`] | LP shares; mint/burn gated by [`MintAuthority`] |
//!
//! All amounts are `u128` atomic units. Serialized amounts are decimal
//! strings (see [`amount_serde`]).

pub mod address;
pub mod amount_serde;
pub mod error;
pub mod lp_share;
pub mod token;

pub use address::derive_address;
pub use error::LedgerError;
pub use lp_share::{LpShareLedger, MintAuthority};
pub use token::{AssetLedger, FungibleLedger, TokenEvent, TokenMetadata, MAX_DECIMALS};
