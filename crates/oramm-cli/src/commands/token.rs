use crate::commands::common::{format_units, parse_amount, Session};
use crate::print_success;
use anyhow::Result;
use oramm_pool::Asset;
use std::path::Path;

pub fn approve(
    from: &str,
    asset: Asset,
    spender: Option<&str>,
    amount: &str,
    config_dir: &Path,
) -> Result<()> {
    let session = Session::open(config_dir)?;
    let amount = parse_amount(amount)?;
    let spender = spender.unwrap_or(session.engine.address()).to_string();
    let meta = session.engine.metadata(asset)?;

    session.engine.approve(from, asset, &spender, amount)?;
    session.save()?;

    print_success(&format!(
        "{} approved {} to spend {} {}",
        from,
        spender,
        format_units(amount, meta.decimals),
        meta.symbol
    ));
    Ok(())
}

pub fn transfer(from: &str, asset: Asset, to: &str, amount: &str, config_dir: &Path) -> Result<()> {
    let session = Session::open(config_dir)?;
    let amount = parse_amount(amount)?;
    let meta = session.engine.metadata(asset)?;

    session.engine.transfer(from, asset, to, amount)?;
    session.save()?;

    print_success(&format!(
        "Sent {} {} from {} to {}",
        format_units(amount, meta.decimals),
        meta.symbol,
        from,
        to
    ));
    Ok(())
}
