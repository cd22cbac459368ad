//! # oramm oracle adapters
//!
//! Read-only price feeds consumed by the pool engine.
//!
//! The engine treats every feed as opaque: it asks for the latest
//! [`OracleReading`] (`price`, `decimals`, `timestamp`) on each operation that
//! needs one and never caches it. Validity (non-zero price, freshness) is
//! checked by the consumer via [`OracleReading::check_fresh`].

pub mod error;
pub mod fixed;
pub mod reading;

pub use error::OracleError;
pub use fixed::FixedPriceOracle;
pub use reading::{deviation_bps, OracleReading, BPS_DENOMINATOR, MAX_READING_DECIMALS};

/// Price oracle interface.
pub trait PriceOracle: Send + Sync {
    /// Latest price of one whole unit of Asset A, denominated in Asset B.
    fn latest_price(&self) -> Result<OracleReading, OracleError>;
}

/// Current unix time in seconds.
pub fn unix_now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
