//! Provisioning: build the two asset ledgers, the LP ledger, a settable
//! oracle and the engine from one [`DeployConfig`], and describe the result
//! in a [`DeploymentRecord`].

use crate::config::{ConfigError, PoolConfig};
use crate::engine::PoolEngine;
use crate::error::PoolError;
use crate::pool::Asset;
use crate::types::LiquidityAdded;
use oramm_ledger::{amount_serde, derive_address, FungibleLedger, LpShareLedger};
use oramm_oracle::FixedPriceOracle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSpec {
    pub name: String,
    pub symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Atomic units credited to the deployer
    #[serde(with = "amount_serde")]
    pub initial_supply: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpTokenSpec {
    pub name: String,
    pub symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

impl Default for LpTokenSpec {
    fn default() -> Self {
        Self {
            name: "oramm LP Share".to_string(),
            symbol: "OLP".to_string(),
            decimals: 18,
        }
    }
}

/// Initial reading of the deployment's settable oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockOracleSpec {
    #[serde(with = "amount_serde")]
    pub price: u128,
    pub decimals: u8,
}

impl Default for MockOracleSpec {
    fn default() -> Self {
        // 2.0 B per A with 8 decimals
        Self {
            price: 200_000_000,
            decimals: 8,
        }
    }
}

fn default_decimals() -> u8 {
    18
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    pub deployer: String,
    pub asset_a: AssetSpec,
    pub asset_b: AssetSpec,
    #[serde(default)]
    pub lp_token: LpTokenSpec,
    #[serde(default)]
    pub oracle: MockOracleSpec,
    #[serde(default)]
    pub pool: PoolConfig,
}

impl DeployConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: DeployConfig = toml::from_str(&content)?;
        config.pool.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Logical component name → address, written once by [`deploy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    #[serde(rename = "TokenA")]
    pub token_a: String,
    #[serde(rename = "TokenB")]
    pub token_b: String,
    #[serde(rename = "LPToken")]
    pub lp_token: String,
    #[serde(rename = "Oracle")]
    pub oracle: String,
    #[serde(rename = "AMM")]
    pub amm: String,
}

impl DeploymentRecord {
    /// Write the record as pretty JSON. Refuses to overwrite an existing
    /// record unless `overwrite` is set.
    pub fn save(&self, path: &Path, overwrite: bool) -> Result<(), PoolError> {
        if path.exists() && !overwrite {
            return Err(PoolError::InvalidConfig(format!(
                "deployment record {} already exists",
                path.display()
            )));
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PoolError::InvalidConfig(e.to_string()))?;
        fs::write(path, json).map_err(ConfigError::from)?;
        log::info!("deployment record written to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, PoolError> {
        let content = fs::read_to_string(path).map_err(ConfigError::from)?;
        serde_json::from_str(&content).map_err(|e| {
            PoolError::InvalidConfig(format!("{}: {}", path.display(), e))
        })
    }
}

/// A freshly provisioned market.
#[derive(Debug)]
pub struct Deployment {
    pub engine: PoolEngine<FungibleLedger>,
    pub oracle: Arc<FixedPriceOracle>,
    pub record: DeploymentRecord,
}

/// Provision every component described by `config`.
pub fn deploy(config: &DeployConfig) -> Result<Deployment, PoolError> {
    let a = &config.asset_a;
    let b = &config.asset_b;
    if a.symbol == b.symbol {
        return Err(PoolError::InvalidConfig(format!(
            "both assets use the symbol {}",
            a.symbol
        )));
    }

    let asset_a = FungibleLedger::new(&a.name, &a.symbol, a.decimals, a.initial_supply, &config.deployer)?;
    let asset_b = FungibleLedger::new(&b.name, &b.symbol, b.decimals, b.initial_supply, &config.deployer)?;

    let pair = format!("{}-{}", a.symbol, b.symbol);
    let lp_address = derive_address("lp", &pair);
    let (lp, authority) = LpShareLedger::new(
        &lp_address,
        &config.lp_token.name,
        &config.lp_token.symbol,
        config.lp_token.decimals,
    )?;

    let oracle = Arc::new(FixedPriceOracle::new(
        config.oracle.price,
        config.oracle.decimals,
    ));
    let engine = PoolEngine::new(
        config.pool.clone(),
        asset_a,
        asset_b,
        lp,
        authority,
        oracle.clone(),
    )?;

    let record = DeploymentRecord {
        token_a: derive_address("token", &a.symbol),
        token_b: derive_address("token", &b.symbol),
        lp_token: lp_address,
        oracle: derive_address("oracle", &pair),
        amm: engine.address().to_string(),
    };
    log::info!(
        "deployed {} pool {} (LP {}, oracle {})",
        pair,
        record.amm,
        record.lp_token,
        record.oracle
    );

    Ok(Deployment {
        engine,
        oracle,
        record,
    })
}

/// Approve the pool for both amounts and make the deposit.
pub fn seed(
    engine: &PoolEngine<FungibleLedger>,
    provider: &str,
    amount_a: u128,
    amount_b: u128,
) -> Result<LiquidityAdded, PoolError> {
    let pool = engine.address().to_string();
    engine.approve(provider, Asset::A, &pool, amount_a)?;
    engine.approve(provider, Asset::B, &pool, amount_b)?;
    engine.add_liquidity(provider, amount_a, amount_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const E18: u128 = 1_000_000_000_000_000_000;

    fn sample() -> DeployConfig {
        toml::from_str(
            r#"
            deployer = "deployer"

            [asset_a]
            name = "Token A"
            symbol = "TKA"
            initial_supply = "1000000000000000000000000"

            [asset_b]
            name = "Token B"
            symbol = "TKB"
            initial_supply = "1000000000000000000000000"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_filled_in() {
        let c = sample();
        assert_eq!(c.asset_a.decimals, 18);
        assert_eq!(c.lp_token.symbol, "OLP");
        assert_eq!(c.oracle.price, 200_000_000);
        assert_eq!(c.pool, PoolConfig::default());
    }

    #[test]
    fn test_deploy_and_seed() {
        let d = deploy(&sample()).unwrap();
        assert_eq!(d.record.amm, d.engine.address());
        assert_ne!(d.record.token_a, d.record.token_b);

        let added = seed(&d.engine, "deployer", 1_000 * E18, 2_000 * E18).unwrap();
        assert!(added.shares > 0);
        assert_eq!(d.engine.reserves().unwrap(), (1_000 * E18, 2_000 * E18));
        assert_eq!(d.engine.price_from_oracle().unwrap().price, 200_000_000);
    }

    #[test]
    fn test_deploy_rejects_duplicate_symbols() {
        let mut c = sample();
        c.asset_b.symbol = "TKA".to_string();
        assert!(matches!(deploy(&c), Err(PoolError::InvalidConfig(_))));
    }

    #[test]
    fn test_record_json_names() {
        let d = deploy(&sample()).unwrap();
        let json = serde_json::to_value(&d.record).unwrap();
        for key in ["TokenA", "TokenB", "LPToken", "Oracle", "AMM"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_record_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployed.json");
        let record = deploy(&sample()).unwrap().record;
        record.save(&path, false).unwrap();
        assert!(record.save(&path, false).is_err());
        record.save(&path, true).unwrap();
        assert_eq!(DeploymentRecord::load(&path).unwrap(), record);
    }

    #[test]
    fn test_deploy_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.toml");
        let c = sample();
        c.save_to_file(&path).unwrap();
        assert_eq!(DeployConfig::load_from_file(&path).unwrap(), c);
    }
}
