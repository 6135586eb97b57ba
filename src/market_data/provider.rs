use anyhow::Result;

use super::Quote;

/// A market-data source that can resolve its configured instruments to
/// current prices in the reporting currency.
#[async_trait::async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch current quotes for every instrument this source covers.
    async fn fetch_quotes(&self) -> Result<Vec<Quote>>;

    fn name(&self) -> &str;
}

/// Source that covers nothing. Useful as a placeholder in tests.
pub struct NoopSource;

#[async_trait::async_trait]
impl QuoteSource for NoopSource {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "noop"
    }
}
