use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("no price feeds available")]
    NoPrice,

    #[error("oracle returned a zero price")]
    ZeroPrice,

    #[error("oracle reading is stale: {age_secs}s old, limit {max_age_secs}s")]
    Stale { age_secs: u64, max_age_secs: u64 },

    #[error("oracle reading is timestamped {secs_ahead}s in the future")]
    FromFuture { secs_ahead: u64 },

    #[error("oracle decimals {0} exceed the supported maximum of 36")]
    DecimalsOutOfRange(u8),

    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    #[error("price overflow while rescaling")]
    Overflow,
}
