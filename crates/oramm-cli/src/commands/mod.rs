pub mod common;
pub mod deploy;
pub mod liquidity;
pub mod oracle;
pub mod query;
pub mod swap;
pub mod token;

use crate::Commands;
use anyhow::Result;
use std::path::Path;

/// Dispatch one parsed command against the state in `config_dir`.
pub fn run(command: Commands, config_dir: &Path) -> Result<()> {
    match command {
        Commands::Deploy {
            config,
            force,
            seed_a,
            seed_b,
        } => deploy::handle(&config, force, seed_a.zip(seed_b), config_dir),
        Commands::Approve {
            from,
            asset,
            spender,
            amount,
        } => token::approve(&from, asset, spender.as_deref(), &amount, config_dir),
        Commands::Transfer {
            from,
            asset,
            to,
            amount,
        } => token::transfer(&from, asset, &to, &amount, config_dir),
        Commands::AddLiquidity {
            from,
            amount_a,
            amount_b,
            min_shares,
        } => liquidity::add(&from, &amount_a, &amount_b, &min_shares, config_dir),
        Commands::RemoveLiquidity {
            from,
            amount,
            min_a,
            min_b,
        } => liquidity::remove(
            &from,
            amount.shares.as_deref(),
            amount.percent,
            &min_a,
            &min_b,
            config_dir,
        ),
        Commands::Swap {
            from,
            asset_in,
            amount,
            min_out,
            max_in,
            deadline_secs,
        } => swap::handle(
            &from,
            asset_in,
            swap::Amount::from_args(amount.amount_in, amount.amount_out)?,
            &min_out,
            max_in.as_deref(),
            deadline_secs,
            config_dir,
        ),
        Commands::Quote {
            asset_in,
            amount_in,
        } => swap::quote(asset_in, &amount_in, config_dir),
        Commands::Price => query::price(config_dir),
        Commands::Position { holder } => query::position(&holder, config_dir),
        Commands::Info => query::info(config_dir),
        Commands::Balance { holder } => query::balance(&holder, config_dir),
        Commands::Events { last } => query::events(last, config_dir),
        Commands::SetOraclePrice { price, decimals } => oracle::set_price(&price, decimals, config_dir),
    }
}
