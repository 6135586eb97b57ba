//! Command layer: wires config, sheet, and market data into rendered
//! dashboard output.

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::info;

use crate::config::{Config, UserConfig};
use crate::format::format_currency;
use crate::market_data::providers::{CryptoQuoteSource, EquityQuoteSource, FxQuoteSource};
use crate::market_data::{PriceTableService, QuoteSource};
use crate::report::{value_records, PriceTable, Valuation};
use crate::sheet::SheetClient;

/// One user's computed asset report.
#[derive(Debug, Clone)]
pub struct UserReport {
    pub user: String,
    pub valuation: Valuation,
}

/// Build the price table service from the configured instruments.
pub fn build_price_service(config: &Config) -> PriceTableService {
    let currency = config.reporting_currency.clone();
    let mut sources: Vec<Arc<dyn QuoteSource>> = Vec::new();

    if !config.market.fx.is_empty() {
        sources.push(Arc::new(FxQuoteSource::new(
            currency.clone(),
            config.market.fx.clone(),
        )));
    }
    if !config.market.crypto.is_empty() {
        sources.push(Arc::new(CryptoQuoteSource::new(
            currency.clone(),
            config.market.crypto.clone(),
        )));
    }
    if !config.market.equity.is_empty() {
        sources.push(Arc::new(EquityQuoteSource::new(
            currency,
            config.market.equity.clone(),
        )));
    }

    PriceTableService::new(sources, config.refresh.price_ttl)
}

/// Which users a report run covers.
fn selected_users<'a>(config: &'a Config, user: Option<&str>) -> Result<Vec<&'a UserConfig>> {
    match user {
        Some(name) => match config.user(name) {
            Some(u) => Ok(vec![u]),
            None => bail!("unknown user {name:?}; configured users: {:?}",
                config.users.iter().map(|u| u.name.as_str()).collect::<Vec<_>>()),
        },
        None => {
            if config.users.is_empty() {
                bail!("no users configured; add [[users]] entries to the config file");
            }
            Ok(config.users.iter().collect())
        }
    }
}

/// Fetch records and prices and run the valuation pipeline for the
/// selected user(s).
pub async fn asset_reports(
    config: &Config,
    sheet: &SheetClient,
    prices: &PriceTableService,
    user: Option<&str>,
) -> Result<Vec<UserReport>> {
    let users = selected_users(config, user)?;
    let table = prices.snapshot().await;

    let mut reports = Vec::with_capacity(users.len());
    for user in users {
        let records = sheet.fetch_records(&user.assets_tab).await?;
        let valuation = value_records(&records, &table);
        info!(
            user = %user.name,
            records = records.len(),
            net_worth = valuation.net_worth(),
            "asset report computed"
        );
        reports.push(UserReport {
            user: user.name.clone(),
            valuation,
        });
    }
    Ok(reports)
}

/// Render one user's asset report as text.
pub fn render_report(report: &UserReport, config: &Config) -> String {
    let display = &config.display;
    let fmt = |value: f64| {
        format_currency(
            value,
            display.currency_decimals,
            display.currency_grouping,
            display.currency_symbol.as_deref(),
        )
    };

    let mut out = String::new();
    out.push_str(&format!("== {} ==\n", report.user));

    out.push_str("자산\n");
    for entry in &report.valuation.assets {
        out.push_str(&format!("  {:<12} {}\n", entry.name, fmt(entry.value)));
    }
    out.push_str("부채\n");
    for entry in &report.valuation.debts {
        out.push_str(&format!("  {:<12} {}\n", entry.name, fmt(entry.value)));
    }

    out.push_str(&format!("총자산   {}\n", fmt(report.valuation.total_asset)));
    out.push_str(&format!("총부채   {}\n", fmt(report.valuation.total_debt)));
    out.push_str(&format!("순자산   {}\n", fmt(report.valuation.net_worth())));
    out
}

/// Render the current price table as text.
pub fn render_price_table(table: &PriceTable, config: &Config) -> String {
    let display = &config.display;
    let mut out = String::new();
    if table.is_empty() {
        out.push_str("(no prices)\n");
        return out;
    }
    for (name, price) in table.sorted_entries() {
        out.push_str(&format!(
            "{:<12} {}\n",
            name,
            format_currency(
                price,
                display.currency_decimals,
                display.currency_grouping,
                display.currency_symbol.as_deref(),
            )
        ));
    }
    out
}
