use crate::commands::common::{format_units, Session};
use crate::print_info;
use anyhow::Result;
use colored::Colorize;
use oramm_pool::{Asset, PoolEvent, PRICE_DECIMALS};
use std::path::Path;

pub fn price(config_dir: &Path) -> Result<()> {
    let session = Session::open(config_dir)?;
    let info = session.engine.info()?;
    let reading = session.engine.price_from_oracle()?;

    println!("\n{}", "Price".cyan().bold());
    if info.pool_price == 0 {
        println!("  Pool:    {}", "empty".yellow());
    } else {
        // Atomic-unit ratio, B per A
        println!(
            "  Pool:    {} {} per atomic {}",
            format_units(info.pool_price, PRICE_DECIMALS),
            info.symbol_b,
            info.symbol_a
        );
    }
    println!(
        "  Oracle:  {} {} per {} (raw {}, {} decimals, t={})",
        format_units(reading.price, reading.decimals),
        info.symbol_b,
        info.symbol_a,
        reading.price,
        reading.decimals,
        reading.timestamp
    );
    let guard = &session.engine.config().oracle;
    if guard.enabled {
        print_info(&format!(
            "Swaps are rejected beyond {} bps from the oracle",
            guard.max_deviation_bps
        ));
    } else {
        print_info("Oracle guard disabled");
    }
    Ok(())
}

pub fn position(holder: &str, config_dir: &Path) -> Result<()> {
    let session = Session::open(config_dir)?;
    let info = session.engine.info()?;
    let (meta_a, meta_b) = (session.engine.metadata(Asset::A)?, session.engine.metadata(Asset::B)?);
    let pos = session.engine.position(holder)?;

    println!("\n{}", "LP Position".cyan().bold());
    println!("  Holder:  {}", pos.holder);
    println!("  Shares:  {} / {} {}", pos.shares, pos.lp_supply, info.lp_symbol);
    println!("  Share:   {}", crate::commands::swap::format_bps(pos.share_bps));
    println!(
        "  Claim:   {} {} + {} {}",
        format_units(pos.amount_a, meta_a.decimals),
        meta_a.symbol,
        format_units(pos.amount_b, meta_b.decimals),
        meta_b.symbol
    );
    Ok(())
}

pub fn info(config_dir: &Path) -> Result<()> {
    let session = Session::open(config_dir)?;
    let info = session.engine.info()?;
    let (meta_a, meta_b) = (session.engine.metadata(Asset::A)?, session.engine.metadata(Asset::B)?);

    println!("\n{}", "Pool".cyan().bold());
    println!("  Address:   {}", info.address);
    println!("  Pair:      {}/{}", info.symbol_a, info.symbol_b);
    println!(
        "  Reserves:  {} {} / {} {}",
        format_units(info.reserve_a, meta_a.decimals),
        info.symbol_a,
        format_units(info.reserve_b, meta_b.decimals),
        info.symbol_b
    );
    println!("  LP Supply: {} {}", info.lp_supply, info.lp_symbol);
    println!("  Fee:       {} bps", info.fee_bps);
    if info.last_trade > 0 {
        println!("  Last trade: {}", info.last_trade);
    }
    Ok(())
}

pub fn balance(holder: &str, config_dir: &Path) -> Result<()> {
    let session = Session::open(config_dir)?;
    println!("\n{}", format!("Balances of {}", holder).cyan().bold());
    for asset in [Asset::A, Asset::B] {
        let meta = session.engine.metadata(asset)?;
        let bal = session.engine.balance_of(asset, holder)?;
        println!("  {:<8} {}", meta.symbol, format_units(bal, meta.decimals));
    }
    let lp = session.engine.lp_metadata()?;
    println!(
        "  {:<8} {}",
        lp.symbol,
        format_units(session.engine.lp_balance_of(holder)?, lp.decimals)
    );
    Ok(())
}

pub fn events(last: Option<usize>, config_dir: &Path) -> Result<()> {
    let session = Session::open(config_dir)?;
    let events = session.engine.events()?;
    if events.is_empty() {
        print_info("No pool events yet");
        return Ok(());
    }
    let skip = last.map_or(0, |n| events.len().saturating_sub(n));
    for event in &events[skip..] {
        println!("{}", describe(event));
    }
    Ok(())
}

fn describe(event: &PoolEvent) -> String {
    match event {
        PoolEvent::LiquidityAdded {
            provider,
            amount_a,
            amount_b,
            shares,
            timestamp,
        } => format!(
            "[{}] {} {} added {} A + {} B for {} shares",
            timestamp,
            event.name().green(),
            provider,
            amount_a,
            amount_b,
            shares
        ),
        PoolEvent::LiquidityRemoved {
            provider,
            amount_a,
            amount_b,
            shares,
            timestamp,
        } => format!(
            "[{}] {} {} burned {} shares for {} A + {} B",
            timestamp,
            event.name().yellow(),
            provider,
            shares,
            amount_a,
            amount_b
        ),
        PoolEvent::Swap {
            trader,
            asset_in,
            amount_in,
            amount_out,
            fee,
            timestamp,
        } => format!(
            "[{}] {} {} paid {} {} (fee {}) for {} {}",
            timestamp,
            event.name().blue(),
            trader,
            amount_in,
            asset_in,
            fee,
            amount_out,
            asset_in.other()
        ),
    }
}
