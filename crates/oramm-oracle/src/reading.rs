use crate::error::OracleError;
use serde::{Deserialize, Serialize};

/// Upper bound on `decimals` accepted for rescaling (10^36 still fits u128).
pub const MAX_READING_DECIMALS: u8 = 36;

/// Basis point denominator (10_000 bps = 100%).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// A single price observation: `price / 10^decimals`, observed at `timestamp`
/// (unix seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleReading {
    pub price: u128,
    pub decimals: u8,
    pub timestamp: u64,
}

impl OracleReading {
    pub fn new(price: u128, decimals: u8, timestamp: u64) -> Self {
        Self {
            price,
            decimals,
            timestamp,
        }
    }

    /// Re-express the price with `target` decimals. Scaling down truncates.
    pub fn scaled_to(&self, target: u8) -> Result<u128, OracleError> {
        if self.decimals > MAX_READING_DECIMALS {
            return Err(OracleError::DecimalsOutOfRange(self.decimals));
        }
        if target > MAX_READING_DECIMALS {
            return Err(OracleError::DecimalsOutOfRange(target));
        }
        if target >= self.decimals {
            let factor = 10u128.pow((target - self.decimals) as u32);
            self.price.checked_mul(factor).ok_or(OracleError::Overflow)
        } else {
            let factor = 10u128.pow((self.decimals - target) as u32);
            Ok(self.price / factor)
        }
    }

    /// Reject zero prices and, when `max_age_secs > 0`, readings older than
    /// `max_age_secs` relative to `now`.
    pub fn check_fresh(&self, now: u64, max_age_secs: u64) -> Result<(), OracleError> {
        if self.price == 0 {
            return Err(OracleError::ZeroPrice);
        }
        if max_age_secs == 0 {
            return Ok(());
        }
        if self.timestamp > now {
            // Small clock skew between feed and engine is tolerated.
            let ahead = self.timestamp - now;
            if ahead > max_age_secs {
                return Err(OracleError::FromFuture { secs_ahead: ahead });
            }
            return Ok(());
        }
        let age = now - self.timestamp;
        if age > max_age_secs {
            return Err(OracleError::Stale {
                age_secs: age,
                max_age_secs,
            });
        }
        Ok(())
    }
}

/// Relative deviation of `observed` from `reference` in basis points,
/// rounded down. Returns `None` if `reference` is zero.
pub fn deviation_bps(observed: u128, reference: u128) -> Option<u128> {
    if reference == 0 {
        return None;
    }
    let diff = observed.abs_diff(reference);
    // diff * 10_000 can overflow for extreme prices; divide first in that case.
    Some(match diff.checked_mul(BPS_DENOMINATOR) {
        Some(scaled) => scaled / reference,
        None => (diff / reference).saturating_mul(BPS_DENOMINATOR),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_up_8_to_18() {
        let r = OracleReading::new(3_000 * 100_000_000, 8, 0);
        assert_eq!(r.scaled_to(18).unwrap(), 3_000 * 10u128.pow(18));
    }

    #[test]
    fn test_scale_down_truncates() {
        let r = OracleReading::new(123_456, 4, 0);
        assert_eq!(r.scaled_to(2).unwrap(), 1_234);
    }

    #[test]
    fn test_scale_overflow() {
        let r = OracleReading::new(u128::MAX, 0, 0);
        assert_eq!(r.scaled_to(18), Err(OracleError::Overflow));
    }

    #[test]
    fn test_decimals_out_of_range() {
        let r = OracleReading::new(1, 40, 0);
        assert_eq!(r.scaled_to(18), Err(OracleError::DecimalsOutOfRange(40)));
    }

    #[test]
    fn test_fresh_reading_passes() {
        let r = OracleReading::new(1, 8, 1_000);
        assert!(r.check_fresh(1_500, 600).is_ok());
    }

    #[test]
    fn test_stale_reading_rejected() {
        let r = OracleReading::new(1, 8, 1_000);
        assert_eq!(
            r.check_fresh(2_000, 600),
            Err(OracleError::Stale {
                age_secs: 1_000,
                max_age_secs: 600
            })
        );
    }

    #[test]
    fn test_zero_max_age_disables_staleness() {
        let r = OracleReading::new(1, 8, 0);
        assert!(r.check_fresh(u64::MAX, 0).is_ok());
    }

    #[test]
    fn test_zero_price_always_rejected() {
        let r = OracleReading::new(0, 8, 100);
        assert_eq!(r.check_fresh(100, 0), Err(OracleError::ZeroPrice));
    }

    #[test]
    fn test_far_future_reading_rejected() {
        let r = OracleReading::new(1, 8, 10_000);
        assert!(matches!(
            r.check_fresh(1_000, 600),
            Err(OracleError::FromFuture { .. })
        ));
    }

    #[test]
    fn test_deviation_bps() {
        assert_eq!(deviation_bps(10_500, 10_000), Some(500));
        assert_eq!(deviation_bps(9_000, 10_000), Some(1_000));
        assert_eq!(deviation_bps(10_000, 10_000), Some(0));
        assert_eq!(deviation_bps(1, 0), None);
    }
}
