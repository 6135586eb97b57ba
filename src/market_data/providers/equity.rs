//! Equity and exchange-traded commodity quote source.
//!
//! Fetches last-trade prices for the configured symbols in one batched
//! request and maps each symbol back to its sheet label. Covers listed
//! equities and metals tickers alike; anything quoted by symbol.

use anyhow::Result;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::config::EquityInstrument;
use crate::market_data::{Quote, QuoteSource};

const DEFAULT_EQUITY_BASE_URL: &str = "https://quote.example-securities.com";

#[derive(Debug, Deserialize)]
struct QuoteBatchResponse {
    quotes: Vec<SymbolQuote>,
}

#[derive(Debug, Deserialize)]
struct SymbolQuote {
    symbol: String,
    /// Last traded price. Absent while the symbol is halted or unknown.
    price: Option<f64>,
}

/// Symbol-quoted instrument price source.
pub struct EquityQuoteSource {
    client: Client,
    base_url: String,
    reporting_currency: String,
    instruments: Vec<EquityInstrument>,
}

impl EquityQuoteSource {
    pub fn new(reporting_currency: impl Into<String>, instruments: Vec<EquityInstrument>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_EQUITY_BASE_URL.to_string(),
            reporting_currency: reporting_currency.into().to_uppercase(),
            instruments,
        }
    }

    /// Override the API base URL (used by tests to point at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn label_for(&self, symbol: &str) -> Option<&str> {
        self.instruments
            .iter()
            .find(|i| i.symbol == symbol)
            .map(|i| i.label.as_str())
    }
}

#[async_trait::async_trait]
impl QuoteSource for EquityQuoteSource {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        if self.instruments.is_empty() {
            return Ok(Vec::new());
        }

        let symbols: Vec<&str> = self.instruments.iter().map(|i| i.symbol.as_str()).collect();
        let url = format!("{}/quote?symbols={}", self.base_url, symbols.join(","));

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<QuoteBatchResponse>()
            .await?;

        let mut quotes = Vec::with_capacity(self.instruments.len());
        for symbol_quote in response.quotes {
            let Some(label) = self.label_for(&symbol_quote.symbol) else {
                continue;
            };
            let Some(price) = symbol_quote.price else {
                warn!(symbol = %symbol_quote.symbol, "symbol returned no price");
                continue;
            };
            quotes.push(Quote {
                name: label.to_string(),
                price,
                currency: self.reporting_currency.clone(),
                source: self.name().to_string(),
                timestamp: Utc::now(),
            });
        }

        Ok(quotes)
    }

    fn name(&self) -> &str {
        "equity"
    }
}
