//! Exchange-rate source using ECB-style daily reference rates.
//!
//! The API publishes rates relative to a requested base currency, so one
//! request per tracked currency converts it into the reporting currency.
//! No API key is required.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::config::FxInstrument;
use crate::market_data::{Quote, QuoteSource};

const DEFAULT_FX_BASE_URL: &str = "https://api.frankfurter.app";

/// Response for a latest-rates request.
#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[allow(dead_code)]
    amount: f64,
    #[allow(dead_code)]
    base: String,
    /// Map of currency codes to rates.
    rates: HashMap<String, f64>,
}

/// Currency price source.
///
/// Each configured currency is quoted as the price of one unit of that
/// currency in the reporting currency (e.g. "달러" → KRW per USD).
#[derive(Debug, Clone)]
pub struct FxQuoteSource {
    client: Client,
    base_url: String,
    reporting_currency: String,
    instruments: Vec<FxInstrument>,
}

impl FxQuoteSource {
    pub fn new(reporting_currency: impl Into<String>, instruments: Vec<FxInstrument>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_FX_BASE_URL.to_string(),
            reporting_currency: reporting_currency.into().to_uppercase(),
            instruments,
        }
    }

    /// Override the API base URL (used by tests to point at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch_rate(&self, code: &str) -> Result<f64> {
        let quote = &self.reporting_currency;
        if code == quote.as_str() {
            return Ok(1.0);
        }

        let url = format!("{}/latest?from={code}&to={quote}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<RatesResponse>()
            .await?;

        response
            .rates
            .get(quote)
            .copied()
            .ok_or_else(|| anyhow!("currency {quote} missing from rates response"))
    }
}

#[async_trait::async_trait]
impl QuoteSource for FxQuoteSource {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        let mut quotes = Vec::with_capacity(self.instruments.len());

        for instrument in &self.instruments {
            let code = instrument.code.to_uppercase();
            let rate = self.fetch_rate(&code).await?;
            quotes.push(Quote {
                name: instrument.label.clone(),
                price: rate,
                currency: self.reporting_currency.clone(),
                source: self.name().to_string(),
                timestamp: Utc::now(),
            });
        }

        Ok(quotes)
    }

    fn name(&self) -> &str {
        "fx"
    }
}
