use crate::commands::common::{format_units, parse_amount, Session};
use crate::{print_info, print_success};
use anyhow::{bail, Result};
use colored::Colorize;
use oramm_oracle::unix_now;
use oramm_pool::{Asset, SwapRequest};
use std::path::Path;

/// Which side of the swap the caller fixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    In(String),
    Out(String),
}

impl Amount {
    pub fn from_args(amount_in: Option<String>, amount_out: Option<String>) -> Result<Self> {
        match (amount_in, amount_out) {
            (Some(a), None) => Ok(Amount::In(a)),
            (None, Some(a)) => Ok(Amount::Out(a)),
            _ => bail!("pass exactly one of --amount-in or --amount-out"),
        }
    }
}

pub fn handle(
    from: &str,
    asset_in: Asset,
    amount: Amount,
    min_out: &str,
    max_in: Option<&str>,
    deadline_secs: Option<u64>,
    config_dir: &Path,
) -> Result<()> {
    let mut req = match amount {
        Amount::In(raw) => SwapRequest::exact_in(asset_in, parse_amount(&raw)?)
            .with_min_out(parse_amount(min_out)?),
        Amount::Out(raw) => {
            let max_in = match max_in {
                Some(m) => parse_amount(m)?,
                None => u128::MAX,
            };
            SwapRequest::exact_out(asset_in, parse_amount(&raw)?, max_in)
        }
    };
    if let Some(secs) = deadline_secs {
        req = req.with_deadline(unix_now().saturating_add(secs));
    }

    let session = Session::open(config_dir)?;
    let meta_in = session.engine.metadata(asset_in)?;
    let meta_out = session.engine.metadata(asset_in.other())?;

    let outcome = session.engine.swap_with(from, req)?;
    session.save()?;

    print_success(&format!(
        "Swapped {} {} for {} {}",
        format_units(outcome.amount_in, meta_in.decimals),
        meta_in.symbol,
        format_units(outcome.amount_out, meta_out.decimals),
        meta_out.symbol
    ));
    print_info(&format!(
        "Fee {} {}, price impact {}",
        format_units(outcome.fee, meta_in.decimals),
        meta_in.symbol,
        format_bps(outcome.price_impact_bps)
    ));
    Ok(())
}

pub fn quote(asset_in: Asset, amount_in: &str, config_dir: &Path) -> Result<()> {
    let session = Session::open(config_dir)?;
    let meta_in = session.engine.metadata(asset_in)?;
    let meta_out = session.engine.metadata(asset_in.other())?;
    let q = session.engine.quote(asset_in, parse_amount(amount_in)?)?;

    println!("\n{}", "Swap Quote".cyan().bold());
    println!(
        "  In:      {} {}",
        format_units(q.amount_in, meta_in.decimals),
        meta_in.symbol
    );
    println!(
        "  Out:     {} {}",
        format_units(q.amount_out, meta_out.decimals).green().bold(),
        meta_out.symbol
    );
    println!(
        "  Fee:     {} {}",
        format_units(q.fee, meta_in.decimals),
        meta_in.symbol
    );
    println!("  Impact:  {}", format_bps(q.price_impact_bps));
    Ok(())
}

/// `1234` bps → `12.34%`
pub fn format_bps(bps: u128) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}
