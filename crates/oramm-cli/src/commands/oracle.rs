use crate::commands::common::{parse_amount, Session};
use crate::print_success;
use anyhow::{bail, Result};
use oramm_oracle::MAX_READING_DECIMALS;
use std::path::Path;

/// Move the deployment's mock feed. Takes effect for the next swap.
pub fn set_price(price: &str, decimals: Option<u8>, config_dir: &Path) -> Result<()> {
    let price = parse_amount(price)?;
    if price == 0 {
        bail!("oracle price must be greater than zero");
    }
    if let Some(d) = decimals {
        if d > MAX_READING_DECIMALS {
            bail!("oracle decimals must be 0-{}", MAX_READING_DECIMALS);
        }
    }

    let mut session = Session::open(config_dir)?;
    session.set_oracle(price, decimals)?;
    let spec = session.oracle_spec();
    session.save()?;

    print_success(&format!(
        "Oracle price set to {} ({} decimals)",
        spec.price, spec.decimals
    ));
    Ok(())
}
