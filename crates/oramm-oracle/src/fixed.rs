use crate::error::OracleError;
use crate::reading::OracleReading;
use crate::{unix_now, PriceOracle};
use std::sync::RwLock;

#[derive(Debug, Clone, Copy)]
struct Feed {
    price: u128,
    decimals: u8,
    /// `None` = stamp each reading with the current time
    timestamp: Option<u64>,
}

/// A settable price feed: the deployment's mock oracle, and the feed used
/// by tests to drive the engine's deviation and staleness checks.
#[derive(Debug)]
pub struct FixedPriceOracle {
    feed: RwLock<Feed>,
}

impl FixedPriceOracle {
    pub fn new(price: u128, decimals: u8) -> Self {
        Self {
            feed: RwLock::new(Feed {
                price,
                decimals,
                timestamp: None,
            }),
        }
    }

    pub fn set_price(&self, price: u128) -> Result<(), OracleError> {
        let mut feed = self.write()?;
        log::debug!("fixed oracle price {} -> {}", feed.price, price);
        feed.price = price;
        Ok(())
    }

    pub fn set_decimals(&self, decimals: u8) -> Result<(), OracleError> {
        self.write()?.decimals = decimals;
        Ok(())
    }

    /// Pin the reading timestamp (`None` restores live timestamps).
    pub fn set_timestamp(&self, timestamp: Option<u64>) -> Result<(), OracleError> {
        self.write()?.timestamp = timestamp;
        Ok(())
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Feed>, OracleError> {
        self.feed
            .write()
            .map_err(|_| OracleError::Unavailable("feed lock poisoned".to_string()))
    }
}

impl PriceOracle for FixedPriceOracle {
    fn latest_price(&self) -> Result<OracleReading, OracleError> {
        let feed = *self
            .feed
            .read()
            .map_err(|_| OracleError::Unavailable("feed lock poisoned".to_string()))?;
        Ok(OracleReading::new(
            feed.price,
            feed.decimals,
            feed.timestamp.unwrap_or_else(unix_now),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_back_verbatim() {
        let oracle = FixedPriceOracle::new(3_000 * 100_000_000, 8);
        let r = oracle.latest_price().unwrap();
        assert_eq!(r.price, 300_000_000_000);
        assert_eq!(r.decimals, 8);
    }

    #[test]
    fn test_live_timestamp() {
        let oracle = FixedPriceOracle::new(1, 8);
        let now = unix_now();
        let r = oracle.latest_price().unwrap();
        assert!(r.timestamp >= now);
    }

    #[test]
    fn test_set_price_and_timestamp() {
        let oracle = FixedPriceOracle::new(1, 8);
        oracle.set_price(42).unwrap();
        oracle.set_timestamp(Some(7)).unwrap();
        assert_eq!(oracle.latest_price().unwrap(), OracleReading::new(42, 8, 7));
        oracle.set_decimals(6).unwrap();
        assert_eq!(oracle.latest_price().unwrap().decimals, 6);
    }
}
