use crate::commands::common::{format_units, parse_amount, Session};
use crate::{print_info, print_success};
use anyhow::{bail, Result};
use oramm_pool::{AddLiquidityRequest, Asset, RemoveAmount, RemoveLiquidityRequest};
use std::path::Path;

pub fn add(from: &str, amount_a: &str, amount_b: &str, min_shares: &str, config_dir: &Path) -> Result<()> {
    let session = Session::open(config_dir)?;
    let req = AddLiquidityRequest {
        min_shares: parse_amount(min_shares)?,
        ..AddLiquidityRequest::new(parse_amount(amount_a)?, parse_amount(amount_b)?)
    };
    let (meta_a, meta_b) = (session.engine.metadata(Asset::A)?, session.engine.metadata(Asset::B)?);

    let added = session.engine.add_liquidity_with(from, req)?;
    session.save()?;

    print_success(&format!(
        "Deposited {} {} + {} {} for {} LP shares",
        format_units(added.amount_a, meta_a.decimals),
        meta_a.symbol,
        format_units(added.amount_b, meta_b.decimals),
        meta_b.symbol,
        added.shares
    ));
    if added.refund_a > 0 || added.refund_b > 0 {
        print_info(&format!(
            "Unused: {} {} / {} {} (not pulled)",
            format_units(added.refund_a, meta_a.decimals),
            meta_a.symbol,
            format_units(added.refund_b, meta_b.decimals),
            meta_b.symbol
        ));
    }
    Ok(())
}

pub fn remove(
    from: &str,
    shares: Option<&str>,
    percent: Option<u8>,
    min_a: &str,
    min_b: &str,
    config_dir: &Path,
) -> Result<()> {
    let amount = match (shares, percent) {
        (Some(raw), None) => RemoveAmount::Shares(parse_amount(raw)?),
        (None, Some(p)) => RemoveAmount::Percent(p),
        _ => bail!("pass exactly one of --shares or --percent"),
    };
    let req = RemoveLiquidityRequest {
        amount,
        min_amount_a: parse_amount(min_a)?,
        min_amount_b: parse_amount(min_b)?,
    };

    let session = Session::open(config_dir)?;
    let (meta_a, meta_b) = (session.engine.metadata(Asset::A)?, session.engine.metadata(Asset::B)?);
    let removed = session.engine.remove_liquidity_with(from, req)?;
    session.save()?;

    print_success(&format!(
        "Burned {} LP shares for {} {} + {} {}",
        removed.shares,
        format_units(removed.amount_a, meta_a.decimals),
        meta_a.symbol,
        format_units(removed.amount_b, meta_b.decimals),
        meta_b.symbol
    ));
    Ok(())
}
