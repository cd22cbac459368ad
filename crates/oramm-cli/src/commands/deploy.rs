use crate::commands::common::{format_units, parse_amount, Session, RECORD_FILE, STATE_FILE};
use crate::{print_info, print_success};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use oramm_pool::{deploy, seed, DeployConfig};
use std::path::Path;

/// Provision a market from `config_path` and write `state.json` and
/// `deployed.json` into `config_dir`.
pub fn handle(
    config_path: &Path,
    force: bool,
    seed_amounts: Option<(String, String)>,
    config_dir: &Path,
) -> Result<()> {
    let state_file = config_dir.join(STATE_FILE);
    if state_file.exists() && !force {
        bail!(
            "a deployment already exists in {} (use --force to replace it)",
            config_dir.display()
        );
    }

    let mut config = DeployConfig::load_from_file(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    config.pool = config.pool.with_env_overrides()?;

    let deployment = deploy(&config)?;
    let record = &deployment.record;

    println!("\n{}", "Deployment".cyan().bold());
    println!("  {:<8} {}", "TokenA".bold(), record.token_a);
    println!("  {:<8} {}", "TokenB".bold(), record.token_b);
    println!("  {:<8} {}", "LPToken".bold(), record.lp_token);
    println!("  {:<8} {}", "Oracle".bold(), record.oracle);
    println!("  {:<8} {}", "AMM".bold(), record.amm);

    if let Some((raw_a, raw_b)) = seed_amounts {
        let (amount_a, amount_b) = (parse_amount(&raw_a)?, parse_amount(&raw_b)?);
        let added = seed(&deployment.engine, &config.deployer, amount_a, amount_b)?;
        print_info(&format!(
            "Seeded {} {} + {} {} for {} LP shares",
            format_units(added.amount_a, config.asset_a.decimals),
            config.asset_a.symbol,
            format_units(added.amount_b, config.asset_b.decimals),
            config.asset_b.symbol,
            added.shares
        ));
    }

    let record_path = config_dir.join(RECORD_FILE);
    record.save(&record_path, force)?;
    Session::new(deployment.engine, deployment.oracle, config.oracle, config_dir).save()?;

    print_success(&format!("Deployment written to {}", record_path.display()));
    Ok(())
}
