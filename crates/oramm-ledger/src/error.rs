use thiserror::Error;

/// Failures surfaced by the asset and LP share ledgers.
///
/// Every variant is returned before any balance is touched, so a failed
/// ledger call never leaves a partial debit behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient balance: {holder} has {have}, needs {need}")]
    InsufficientBalance { holder: String, have: u128, need: u128 },

    #[error("insufficient allowance: {owner} granted {spender} {have}, needs {need}")]
    InsufficientAllowance {
        owner: String,
        spender: String,
        have: u128,
        need: u128,
    },

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("invalid address {0:?}: must be non-empty and contain no ':'")]
    InvalidAddress(String),

    #[error("invalid token metadata: {0}")]
    InvalidMetadata(String),

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("mint/burn authority has not been installed on {symbol}")]
    AuthorityNotInstalled { symbol: String },

    #[error("mint/burn authority is already installed on {symbol}")]
    AuthorityAlreadyInstalled { symbol: String },

    #[error("caller does not hold the mint/burn authority of {symbol}")]
    Unauthorized { symbol: String },
}

impl LedgerError {
    /// True for balance and allowance shortfalls.
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(
            self,
            LedgerError::InsufficientBalance { .. } | LedgerError::InsufficientAllowance { .. }
        )
    }

    /// True for failures of the mint/burn authority gate.
    pub fn is_authority(&self) -> bool {
        matches!(
            self,
            LedgerError::AuthorityNotInstalled { .. }
                | LedgerError::AuthorityAlreadyInstalled { .. }
                | LedgerError::Unauthorized { .. }
        )
    }
}
