use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::duration::deserialize_duration;

/// Default reporting currency.
fn default_reporting_currency() -> String {
    "KRW".to_string()
}

fn default_currency_symbol() -> Option<String> {
    Some("₩".to_string())
}

fn default_true() -> bool {
    true
}

/// Display/output formatting configuration.
///
/// Presentation only; the valuation pipeline always works in raw decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places rendered for currency values. KRW amounts are whole
    /// won, so the default is 0.
    pub currency_decimals: u32,

    /// When true, render currency values with thousands separators.
    pub currency_grouping: bool,

    /// Optional currency symbol (e.g. "₩", "$") for display rendering.
    pub currency_symbol: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_decimals: 0,
            currency_grouping: default_true(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Default price snapshot lifetime (10 minutes).
fn default_price_ttl() -> Duration {
    Duration::from_secs(10 * 60)
}

/// Refresh configuration for the market-data snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// How old a price snapshot can be before the next report request
    /// refreshes it. Accepts "90s", "15m", "6h", "2d".
    #[serde(
        default = "default_price_ttl",
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_secs"
    )]
    pub price_ttl: Duration,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{}s", d.as_secs()))
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            price_ttl: default_price_ttl(),
        }
    }
}

/// Remote spreadsheet configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// CSV export endpoint of the spreadsheet, without the per-tab query
    /// string (the client appends `format=csv&gid=<tab>`).
    pub export_url: String,
}

/// One household member and the spreadsheet tabs that belong to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Display name, e.g. "지은".
    pub name: String,

    /// Tab id (gid) of this user's asset sheet.
    pub assets_tab: String,
}

/// A currency tracked through the FX source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FxInstrument {
    /// Label the sheet uses for this instrument, e.g. "달러".
    pub label: String,
    /// ISO currency code, e.g. "USD".
    pub code: String,
}

/// A coin tracked through the crypto source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoInstrument {
    pub label: String,
    /// Provider coin id, e.g. "bitcoin".
    pub id: String,
}

/// A symbol tracked through the equity/commodity quote source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityInstrument {
    pub label: String,
    /// Exchange symbol, e.g. "005930" or a metals ticker.
    pub symbol: String,
}

/// Market-data instrument configuration, grouped by source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub fx: Vec<FxInstrument>,
    pub crypto: Vec<CryptoInstrument>,
    pub equity: Vec<EquityInstrument>,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Currency all values are reported in (e.g. "KRW").
    #[serde(default = "default_reporting_currency")]
    pub reporting_currency: String,

    /// Household members with their sheet tabs.
    pub users: Vec<UserConfig>,

    /// Remote spreadsheet settings.
    pub sheet: SheetConfig,

    /// Tracked market instruments.
    pub market: MarketConfig,

    /// Snapshot refresh settings.
    pub refresh: RefreshConfig,

    /// Display/output formatting settings.
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reporting_currency: default_reporting_currency(),
            users: Vec::new(),
            sheet: SheetConfig::default(),
            market: MarketConfig::default(),
            refresh: RefreshConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Find a user by name, case-sensitively.
    pub fn user(&self, name: &str) -> Option<&UserConfig> {
        self.users.iter().find(|u| u.name == name)
    }
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./housebook.toml` if it exists in the current directory
/// 2. `~/.config/housebook/housebook.toml`
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("housebook.toml");
    if local_config.exists() {
        return local_config;
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("housebook").join("housebook.toml");
    }

    local_config
}
