// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ORAMM CLI - Deploy, fund and trade against an oracle-checked AMM pool
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use clap::{Args, Parser, Subcommand};
use colored::*;
use oramm_pool::Asset;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "oramm-cli")]
#[command(about = "oramm CLI - oracle-checked constant-product AMM", long_about = None)]
#[command(version)]
struct Cli {
    /// State directory holding state.json and deployed.json (default: ~/.oramm)
    #[arg(short, long, env = "ORAMM_HOME")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision tokens, LP token, oracle and pool from a deploy config
    Deploy {
        /// Deploy config (TOML)
        #[arg(short = 'f', long, default_value = "config/deploy.toml")]
        config: PathBuf,

        /// Replace an existing deployment
        #[arg(long)]
        force: bool,

        /// Seed the pool with this much Token A from the deployer
        #[arg(long, requires = "seed_b")]
        seed_a: Option<String>,

        /// Seed the pool with this much Token B from the deployer
        #[arg(long, requires = "seed_a")]
        seed_b: Option<String>,
    },

    /// Approve a spender (the pool by default) on one asset
    Approve {
        #[arg(short, long)]
        from: String,

        /// Asset: A or B
        #[arg(short, long)]
        asset: Asset,

        /// Spender address (default: the pool)
        #[arg(long)]
        spender: Option<String>,

        /// Amount (atomic units, or e.g. 100e18)
        #[arg(long)]
        amount: String,
    },

    /// Transfer an asset to another holder
    Transfer {
        #[arg(short, long)]
        from: String,

        #[arg(short, long)]
        asset: Asset,

        #[arg(long)]
        to: String,

        #[arg(long)]
        amount: String,
    },

    /// Deposit both assets for LP shares
    AddLiquidity {
        #[arg(short, long)]
        from: String,

        #[arg(long)]
        amount_a: String,

        #[arg(long)]
        amount_b: String,

        /// Minimum LP shares to receive (slippage protection)
        #[arg(long, default_value = "0")]
        min_shares: String,
    },

    /// Burn LP shares for a proportional slice of the reserves
    RemoveLiquidity {
        #[arg(short, long)]
        from: String,

        #[command(flatten)]
        amount: RemoveArgs,

        #[arg(long, default_value = "0")]
        min_a: String,

        #[arg(long, default_value = "0")]
        min_b: String,
    },

    /// Swap one asset for the other
    Swap {
        #[arg(short, long)]
        from: String,

        /// Asset paid in: A or B
        #[arg(long)]
        asset_in: Asset,

        #[command(flatten)]
        amount: SwapArgs,

        /// Minimum output for --amount-in swaps
        #[arg(long, default_value = "0")]
        min_out: String,

        /// Maximum input for --amount-out swaps (default: unbounded)
        #[arg(long)]
        max_in: Option<String>,

        /// Reject the swap if it executes more than this many seconds from now
        #[arg(long)]
        deadline_secs: Option<u64>,
    },

    /// Preview a swap without executing it
    Quote {
        #[arg(long)]
        asset_in: Asset,

        #[arg(long)]
        amount_in: String,
    },

    /// Show the pool price and the oracle reading
    Price,

    /// Show an LP position
    Position {
        /// Holder address
        holder: String,
    },

    /// Show pool reserves, supply and fee
    Info,

    /// Show a holder's asset and LP balances
    Balance {
        holder: String,
    },

    /// Show the pool event journal
    Events {
        /// Only the last N events
        #[arg(short = 'n', long)]
        last: Option<usize>,
    },

    /// Set the mock oracle's price (and optionally its decimals)
    SetOraclePrice {
        #[arg(long)]
        price: String,

        #[arg(long)]
        decimals: Option<u8>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct RemoveArgs {
    /// Exact number of LP shares to burn
    #[arg(long)]
    shares: Option<String>,

    /// Percentage (1-100) of the current LP balance to burn
    #[arg(long)]
    percent: Option<u8>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SwapArgs {
    /// Spend exactly this much of --asset-in
    #[arg(long)]
    amount_in: Option<String>,

    /// Receive exactly this much of the other asset
    #[arg(long)]
    amount_out: Option<String>,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    // Get config directory
    let config_dir = cli.config_dir.unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".oramm")
    });

    let result = std::fs::create_dir_all(&config_dir)
        .map_err(anyhow::Error::from)
        .and_then(|_| commands::run(cli.command, &config_dir));

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Library `log` records are bridged into the subscriber; `RUST_LOG`
/// overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

// ─────────────────────────────────────────────────────────────────
// UNIT TESTS
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── CLI Argument Parsing ────────────────────────────────────

    #[test]
    fn test_cli_deploy_defaults() {
        let cli = Cli::try_parse_from(["oramm-cli", "deploy"]).unwrap();
        match cli.command {
            Commands::Deploy {
                config,
                force,
                seed_a,
                seed_b,
            } => {
                assert_eq!(config, PathBuf::from("config/deploy.toml"));
                assert!(!force);
                assert!(seed_a.is_none() && seed_b.is_none());
            }
            _ => panic!("Expected Deploy"),
        }
    }

    #[test]
    fn test_cli_deploy_seed_requires_both() {
        assert!(Cli::try_parse_from(["oramm-cli", "deploy", "--seed-a", "1000"]).is_err());
        assert!(Cli::try_parse_from([
            "oramm-cli", "deploy", "--seed-a", "1000e18", "--seed-b", "2000e18"
        ])
        .is_ok());
    }

    #[test]
    fn test_cli_swap_exact_in() {
        let cli = Cli::try_parse_from([
            "oramm-cli",
            "swap",
            "--from",
            "alice",
            "--asset-in",
            "a",
            "--amount-in",
            "100e18",
            "--deadline-secs",
            "60",
        ])
        .unwrap();
        match cli.command {
            Commands::Swap {
                from,
                asset_in,
                amount,
                deadline_secs,
                ..
            } => {
                assert_eq!(from, "alice");
                assert_eq!(asset_in, Asset::A);
                assert_eq!(amount.amount_in.as_deref(), Some("100e18"));
                assert!(amount.amount_out.is_none());
                assert_eq!(deadline_secs, Some(60));
            }
            _ => panic!("Expected Swap"),
        }
    }

    #[test]
    fn test_cli_swap_needs_exactly_one_amount() {
        let base = ["oramm-cli", "swap", "--from", "alice", "--asset-in", "B"];
        assert!(Cli::try_parse_from(base).is_err());
        let both = [&base[..], &["--amount-in", "1", "--amount-out", "1"][..]].concat();
        assert!(Cli::try_parse_from(both).is_err());
    }

    #[test]
    fn test_cli_remove_percent() {
        let cli = Cli::try_parse_from([
            "oramm-cli",
            "remove-liquidity",
            "--from",
            "alice",
            "--percent",
            "10",
        ])
        .unwrap();
        match cli.command {
            Commands::RemoveLiquidity { amount, .. } => {
                assert_eq!(amount.percent, Some(10));
                assert!(amount.shares.is_none());
            }
            _ => panic!("Expected RemoveLiquidity"),
        }
    }

    #[test]
    fn test_cli_bad_asset_rejected() {
        assert!(Cli::try_parse_from([
            "oramm-cli", "quote", "--asset-in", "c", "--amount-in", "1"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_config_dir_flag() {
        let cli = Cli::try_parse_from(["oramm-cli", "-c", "/tmp/oramm", "info"]).unwrap();
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/oramm")));
        assert!(matches!(cli.command, Commands::Info));
    }
}
