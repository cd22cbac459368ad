use crate::config::ConfigError;
use crate::math::MathError;
use oramm_ledger::LedgerError;
use oramm_oracle::OracleError;
use thiserror::Error;

/// Coarse classification of a [`PoolError`], for callers that only need to
/// decide how to react (retry, top up, fix input, alert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range input.
    Validation,
    /// Balance, allowance or LP-share shortfall.
    InsufficientFunds,
    /// The operation would break a pool invariant.
    InvariantViolation,
    /// Mint/burn capability problems.
    Authority,
    /// The price feed is missing, stale or unusable.
    Oracle,
    /// Engine-internal failure (poisoned lock).
    Internal,
}

#[derive(Debug, Error)]
pub enum PoolError {
    // ── validation ──────────────────────────────────────────
    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("swap input must be greater than zero")]
    ZeroInput,

    #[error("percentage must be between 1 and 100, got {0}")]
    InvalidPercentage(u8),

    #[error("first deposit requires both amounts to be non-zero")]
    InvalidInitialDeposit,

    #[error("direct transfers to the pool address {0} are not accepted")]
    DirectTransferToPool(String),

    #[error("{0} is reserved and cannot act as a caller")]
    ReservedAddress(String),

    #[error("deadline {deadline} has passed (now {now})")]
    DeadlineExpired { deadline: u64, now: u64 },

    #[error("slippage exceeded: {0}")]
    SlippageExceeded(String),

    #[error("invalid pool configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    // ── funds ───────────────────────────────────────────────
    #[error("insufficient LP shares: have {have}, need {need}")]
    InsufficientLpBalance { have: u128, need: u128 },

    // ── invariants ──────────────────────────────────────────
    #[error("output {requested} would drain reserve {reserve}")]
    InsufficientOutputReserve { requested: u128, reserve: u128 },

    #[error(
        "execution price {execution_price} deviates {deviation_bps} bps from oracle price {oracle_price} (max {max_bps} bps)"
    )]
    PriceDeviationExceeded {
        execution_price: u128,
        oracle_price: u128,
        deviation_bps: u128,
        max_bps: u32,
    },

    #[error("swap output rounds to zero")]
    ZeroOutput,

    #[error("withdrawal rounds to zero for at least one asset")]
    ZeroWithdrawal,

    #[error("deposit mints zero LP shares")]
    ZeroLiquidityMint,

    #[error("initial liquidity {minted} does not exceed the locked minimum {minimum}")]
    InitialLiquidityTooSmall { minted: u128, minimum: u128 },

    #[error("pool has no liquidity")]
    EmptyPool,

    #[error("arithmetic overflow: {0}")]
    Overflow(#[from] MathError),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    // ── authority ───────────────────────────────────────────
    #[error("mint authority does not match the LP ledger: {0}")]
    AuthorityMismatch(String),

    // ── wrapped ─────────────────────────────────────────────
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("oracle: {0}")]
    Oracle(#[from] OracleError),

    #[error("pool state lock poisoned")]
    LockPoisoned,
}

impl PoolError {
    pub fn kind(&self) -> ErrorKind {
        use PoolError::*;
        match self {
            ZeroAmount
            | ZeroInput
            | InvalidPercentage(_)
            | InvalidInitialDeposit
            | DirectTransferToPool(_)
            | ReservedAddress(_)
            | DeadlineExpired { .. }
            | SlippageExceeded(_)
            | InvalidConfig(_)
            | Config(_) => ErrorKind::Validation,
            InsufficientLpBalance { .. } => ErrorKind::InsufficientFunds,
            InsufficientOutputReserve { .. }
            | PriceDeviationExceeded { .. }
            | ZeroOutput
            | ZeroWithdrawal
            | ZeroLiquidityMint
            | InitialLiquidityTooSmall { .. }
            | EmptyPool
            | Overflow(_)
            | InvariantViolation(_) => ErrorKind::InvariantViolation,
            AuthorityMismatch(_) => ErrorKind::Authority,
            Ledger(e) if e.is_insufficient_funds() => ErrorKind::InsufficientFunds,
            Ledger(e) if e.is_authority() => ErrorKind::Authority,
            Ledger(LedgerError::Overflow(_)) => ErrorKind::InvariantViolation,
            Ledger(_) => ErrorKind::Validation,
            Oracle(_) => ErrorKind::Oracle,
            LockPoisoned => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_errors_classified() {
        let short: PoolError = LedgerError::InsufficientAllowance {
            owner: "alice".into(),
            spender: "pool".into(),
            have: 0,
            need: 1,
        }
        .into();
        assert_eq!(short.kind(), ErrorKind::InsufficientFunds);

        let auth: PoolError = LedgerError::Unauthorized { symbol: "OLP".into() }.into();
        assert_eq!(auth.kind(), ErrorKind::Authority);

        let bad: PoolError = LedgerError::ZeroAmount.into();
        assert_eq!(bad.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_engine_errors_classified() {
        assert_eq!(PoolError::ZeroInput.kind(), ErrorKind::Validation);
        assert_eq!(
            PoolError::InsufficientOutputReserve { requested: 5, reserve: 5 }.kind(),
            ErrorKind::InvariantViolation
        );
        assert_eq!(PoolError::Oracle(OracleError::NoPrice).kind(), ErrorKind::Oracle);
        assert_eq!(PoolError::LockPoisoned.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_display_carries_context() {
        let e = PoolError::InsufficientLpBalance { have: 3, need: 7 };
        assert_eq!(e.to_string(), "insufficient LP shares: have 3, need 7");
    }
}
