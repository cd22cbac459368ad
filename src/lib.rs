//! Shared fixtures for the workspace-level integration tests.

use oramm_pool::deployment::{AssetSpec, LpTokenSpec};
use oramm_pool::{DeployConfig, MockOracleSpec, PoolConfig};

pub const E18: u128 = 1_000_000_000_000_000_000;

/// Supply minted to the deployer of each asset: one million whole tokens.
pub const INITIAL_SUPPLY: u128 = 1_000_000 * E18;

pub const DEPLOYER: &str = "deployer";

/// Two 18-decimal assets, the default LP token, default pool parameters
/// and the default mock feed quoting 2.00000000 B per A.
pub fn deploy_config() -> DeployConfig {
    DeployConfig {
        deployer: DEPLOYER.to_string(),
        asset_a: AssetSpec {
            name: "Token A".to_string(),
            symbol: "TKA".to_string(),
            decimals: 18,
            initial_supply: INITIAL_SUPPLY,
        },
        asset_b: AssetSpec {
            name: "Token B".to_string(),
            symbol: "TKB".to_string(),
            decimals: 18,
            initial_supply: INITIAL_SUPPLY,
        },
        lp_token: LpTokenSpec::default(),
        oracle: MockOracleSpec::default(),
        pool: PoolConfig::default(),
    }
}
