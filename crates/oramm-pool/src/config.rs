use oramm_ledger::amount_serde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default swap fee: 0.30%.
pub const DEFAULT_FEE_BPS: u16 = 30;
/// Hard cap on the swap fee: 10%.
pub const MAX_FEE_BPS: u16 = 1_000;
/// Default oracle tolerance: 10% between execution price and feed.
pub const DEFAULT_MAX_DEVIATION_BPS: u32 = 1_000;
/// Default oracle staleness limit: one hour.
pub const DEFAULT_MAX_ORACLE_AGE_SECS: u64 = 3_600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("environment variable {name}: {reason}")]
    Env { name: &'static str, reason: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Pool parameters. Immutable once the engine is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    #[serde(default = "default_fee_bps")]
    pub fee_bps: u16,
    /// Shares locked forever on the first deposit (0 = no lock)
    #[serde(default, with = "amount_serde")]
    pub minimum_liquidity: u128,
    #[serde(default)]
    pub oracle: OracleGuardConfig,
}

/// How swaps are checked against the price oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleGuardConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_max_deviation_bps")]
    pub max_deviation_bps: u32,
    /// 0 disables the staleness check
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

fn default_fee_bps() -> u16 {
    DEFAULT_FEE_BPS
}

fn default_true() -> bool {
    true
}

fn default_max_deviation_bps() -> u32 {
    DEFAULT_MAX_DEVIATION_BPS
}

fn default_max_age_secs() -> u64 {
    DEFAULT_MAX_ORACLE_AGE_SECS
}

impl Default for OracleGuardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_deviation_bps: DEFAULT_MAX_DEVIATION_BPS,
            max_age_secs: DEFAULT_MAX_ORACLE_AGE_SECS,
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            fee_bps: DEFAULT_FEE_BPS,
            minimum_liquidity: 0,
            oracle: OracleGuardConfig::default(),
        }
    }
}

impl PoolConfig {
    /// Load pool config from a TOML file and validate it.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PoolConfig = toml::from_str(content)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Overlay `ORAMM_*` environment variables on top of `self`.
    /// Useful for containerized deployments.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(v) = env_parse::<u16>("ORAMM_FEE_BPS")? {
            self.fee_bps = v;
        }
        if let Some(v) = env_parse::<u128>("ORAMM_MINIMUM_LIQUIDITY")? {
            self.minimum_liquidity = v;
        }
        if let Some(v) = env_parse::<u32>("ORAMM_ORACLE_MAX_DEVIATION_BPS")? {
            self.oracle.max_deviation_bps = v;
        }
        if let Some(v) = env_parse::<u64>("ORAMM_ORACLE_MAX_AGE_SECS")? {
            self.oracle.max_age_secs = v;
        }
        self.validate().map_err(ConfigError::Invalid)?;
        Ok(self)
    }

    /// Save pool config to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fee_bps > MAX_FEE_BPS {
            return Err(format!(
                "fee_bps {} exceeds maximum {}",
                self.fee_bps, MAX_FEE_BPS
            ));
        }
        if self.oracle.enabled && self.oracle.max_deviation_bps == 0 {
            // Any trade moves the price, so a zero band would reject every swap.
            return Err("oracle.max_deviation_bps must be > 0 when the oracle guard is enabled".to_string());
        }
        Ok(())
    }
}

fn env_parse<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|e: T::Err| ConfigError::Env {
            name,
            reason: e.to_string(),
        }),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::Env {
            name,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = PoolConfig::default();
        assert_eq!(c.fee_bps, 30);
        assert_eq!(c.minimum_liquidity, 0);
        assert!(c.oracle.enabled);
        assert_eq!(c.oracle.max_deviation_bps, 1_000);
        assert_eq!(c.oracle.max_age_secs, 3_600);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(PoolConfig::from_toml_str("").unwrap(), PoolConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let c = PoolConfig::from_toml_str(
            r#"
            fee_bps = 5
            minimum_liquidity = "1000"

            [oracle]
            max_age_secs = 0
            "#,
        )
        .unwrap();
        assert_eq!(c.fee_bps, 5);
        assert_eq!(c.minimum_liquidity, 1_000);
        assert_eq!(c.oracle.max_age_secs, 0);
        assert_eq!(c.oracle.max_deviation_bps, DEFAULT_MAX_DEVIATION_BPS);
    }

    #[test]
    fn test_fee_cap_enforced() {
        let err = PoolConfig::from_toml_str("fee_bps = 1001").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_band_rejected_only_when_enabled() {
        let mut c = PoolConfig::default();
        c.oracle.max_deviation_bps = 0;
        assert!(c.validate().is_err());
        c.oracle.enabled = false;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.toml");
        let mut c = PoolConfig::default();
        c.minimum_liquidity = 10u128.pow(30);
        c.save_to_file(&path).unwrap();
        assert_eq!(PoolConfig::load_from_file(&path).unwrap(), c);
    }

    #[test]
    fn test_missing_file() {
        let err = PoolConfig::load_from_file(Path::new("/nonexistent/pool.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
