//! Cryptocurrency price source using a simple-price endpoint.
//!
//! One batched request quotes every configured coin directly in the
//! reporting currency.

use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use reqwest::Client;
use tracing::warn;

use crate::config::CryptoInstrument;
use crate::market_data::{Quote, QuoteSource};

const DEFAULT_CRYPTO_BASE_URL: &str = "https://api.coingecko.com";

/// coin id -> { currency code -> price }
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// Cryptocurrency price source.
pub struct CryptoQuoteSource {
    client: Client,
    base_url: String,
    reporting_currency: String,
    instruments: Vec<CryptoInstrument>,
}

impl CryptoQuoteSource {
    pub fn new(reporting_currency: impl Into<String>, instruments: Vec<CryptoInstrument>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_CRYPTO_BASE_URL.to_string(),
            reporting_currency: reporting_currency.into().to_lowercase(),
            instruments,
        }
    }

    /// Override the API base URL (used by tests to point at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait::async_trait]
impl QuoteSource for CryptoQuoteSource {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        if self.instruments.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<&str> = self.instruments.iter().map(|i| i.id.as_str()).collect();
        let url = format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies={}",
            self.base_url,
            ids.join(","),
            self.reporting_currency
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<SimplePriceResponse>()
            .await?;

        let mut quotes = Vec::with_capacity(self.instruments.len());
        for instrument in &self.instruments {
            let price = response
                .get(&instrument.id)
                .and_then(|prices| prices.get(&self.reporting_currency))
                .copied();

            match price {
                Some(price) => quotes.push(Quote {
                    name: instrument.label.clone(),
                    price,
                    currency: self.reporting_currency.to_uppercase(),
                    source: self.name().to_string(),
                    timestamp: Utc::now(),
                }),
                // A coin the API doesn't know stays out of the price
                // table; its sheet rows fall back to direct amounts.
                None => warn!(coin = %instrument.id, "coin missing from price response"),
            }
        }

        Ok(quotes)
    }

    fn name(&self) -> &str {
        "crypto"
    }
}
