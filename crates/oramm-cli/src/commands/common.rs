use anyhow::{anyhow, bail, Context, Result};
use oramm_ledger::FungibleLedger;
use oramm_oracle::FixedPriceOracle;
use oramm_pool::{EngineParts, MockOracleSpec, PoolEngine};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const STATE_FILE: &str = "state.json";
pub const RECORD_FILE: &str = "deployed.json";

/// On-disk form of a deployed market: the engine parts plus the mock
/// oracle's current setting.
#[derive(Serialize, Deserialize)]
struct StateFile {
    engine: EngineParts<FungibleLedger>,
    oracle: MockOracleSpec,
}

/// A loaded market. Mutating commands call [`Session::save`] once they succeed.
pub struct Session {
    pub engine: PoolEngine<FungibleLedger>,
    pub oracle: Arc<FixedPriceOracle>,
    oracle_spec: MockOracleSpec,
    path: PathBuf,
}

pub fn state_path(config_dir: &Path) -> PathBuf {
    config_dir.join(STATE_FILE)
}

impl Session {
    pub fn new(
        engine: PoolEngine<FungibleLedger>,
        oracle: Arc<FixedPriceOracle>,
        oracle_spec: MockOracleSpec,
        config_dir: &Path,
    ) -> Self {
        Self {
            engine,
            oracle,
            oracle_spec,
            path: state_path(config_dir),
        }
    }

    pub fn open(config_dir: &Path) -> Result<Self> {
        let path = state_path(config_dir);
        if !path.exists() {
            bail!(
                "no deployment found at {} (run `oramm-cli deploy` first)",
                path.display()
            );
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let state: StateFile = serde_json::from_str(&data)
            .with_context(|| format!("parsing {}", path.display()))?;

        let oracle = Arc::new(FixedPriceOracle::new(
            state.oracle.price,
            state.oracle.decimals,
        ));
        let engine = PoolEngine::from_parts(state.engine, oracle.clone())?;
        log::debug!("loaded pool {} from {}", engine.address(), path.display());
        Ok(Self {
            engine,
            oracle,
            oracle_spec: state.oracle,
            path,
        })
    }

    /// Change the mock oracle's reading, both live and in the saved state.
    pub fn set_oracle(&mut self, price: u128, decimals: Option<u8>) -> Result<()> {
        self.oracle.set_price(price)?;
        self.oracle_spec.price = price;
        if let Some(d) = decimals {
            self.oracle.set_decimals(d)?;
            self.oracle_spec.decimals = d;
        }
        Ok(())
    }

    pub fn oracle_spec(&self) -> MockOracleSpec {
        self.oracle_spec
    }

    /// Persist via a temp file and rename so a crash never leaves a torn state file.
    pub fn save(self) -> Result<()> {
        let state = StateFile {
            engine: self.engine.into_parts()?,
            oracle: self.oracle_spec,
        };
        let json = serde_json::to_string_pretty(&state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

/// Parse an atomic amount: plain digits (`1500`), or a mantissa with an
/// exponent (`100e18`, `1.5e18`). Underscores are ignored.
pub fn parse_amount(raw: &str) -> Result<u128> {
    let s: String = raw.trim().chars().filter(|c| *c != '_').collect();
    if s.is_empty() {
        bail!("empty amount");
    }
    let (mantissa, exp) = match s.split_once(['e', 'E']) {
        Some((m, e)) => (
            m,
            e.parse::<u32>()
                .map_err(|_| anyhow!("invalid exponent in amount '{}'", raw))?,
        ),
        None => (s.as_str(), 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        bail!("invalid amount '{}'", raw);
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        bail!("invalid amount '{}'", raw);
    }
    let frac_digits = frac_part.len() as u32;
    if frac_digits > exp {
        bail!("amount '{}' is not a whole number of atomic units", raw);
    }

    let digits = format!("{}{}", int_part, frac_part);
    let base: u128 = if digits.is_empty() {
        0
    } else {
        digits
            .parse()
            .map_err(|_| anyhow!("amount '{}' is too large", raw))?
    };
    10u128
        .checked_pow(exp - frac_digits)
        .and_then(|scale| base.checked_mul(scale))
        .ok_or_else(|| anyhow!("amount '{}' is too large", raw))
}

/// Render atomic units as a decimal string with trailing zeros trimmed.
pub fn format_units(amount: u128, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let scale = 10u128.pow(decimals as u32);
    let whole = amount / scale;
    let frac = amount % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
