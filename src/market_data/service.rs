//! Price table construction with a time-based refresh window.
//!
//! The valuation pipeline wants a consistent snapshot per run, not live
//! quotes: this service fetches all sources at most once per TTL and
//! hands out the cached table in between. A failing source never aborts
//! a snapshot; its instruments simply stay out of the table and the
//! pipeline treats them as price-unknown.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::QuoteSource;
use crate::report::PriceTable;

#[derive(Debug, Clone)]
struct CachedSnapshot {
    table: PriceTable,
    fetched_at: DateTime<Utc>,
}

/// Aggregates quote sources into [`PriceTable`] snapshots.
pub struct PriceTableService {
    sources: Vec<Arc<dyn QuoteSource>>,
    ttl: Duration,
    cache: Mutex<Option<CachedSnapshot>>,
}

impl PriceTableService {
    pub fn new(sources: Vec<Arc<dyn QuoteSource>>, ttl: Duration) -> Self {
        Self {
            sources,
            ttl,
            cache: Mutex::new(None),
        }
    }

    /// Current price snapshot, refreshed when older than the TTL.
    pub async fn snapshot(&self) -> PriceTable {
        self.snapshot_at(Utc::now()).await
    }

    /// Snapshot as of an injected "now". The cache is consulted and
    /// refreshed under one lock so concurrent report renders share a
    /// single refresh.
    pub async fn snapshot_at(&self, now: DateTime<Utc>) -> PriceTable {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            let age = (now - cached.fetched_at).to_std().unwrap_or(Duration::MAX);
            if age <= self.ttl {
                debug!(age_secs = age.as_secs(), "serving cached price table");
                return cached.table.clone();
            }
        }

        let table = self.fetch_all().await;
        *cache = Some(CachedSnapshot {
            table: table.clone(),
            fetched_at: now,
        });
        table
    }

    /// Drop the cached snapshot so the next request refetches.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    async fn fetch_all(&self) -> PriceTable {
        let mut table = PriceTable::new();

        for source in &self.sources {
            match source.fetch_quotes().await {
                Ok(quotes) => {
                    for quote in quotes {
                        if !quote.price.is_finite() || quote.price < 0.0 {
                            warn!(
                                source = source.name(),
                                name = %quote.name,
                                price = quote.price,
                                "discarding invalid quote"
                            );
                            continue;
                        }
                        table.insert(quote.name, quote.price);
                    }
                }
                Err(err) => {
                    warn!(source = source.name(), error = %err, "quote source failed");
                }
            }
        }

        debug!(instruments = table.len(), "price table refreshed");
        table
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::{anyhow, Result};
    use chrono::TimeDelta;

    use super::*;
    use crate::market_data::Quote;

    struct CountingSource {
        calls: AtomicUsize,
        price: f64,
    }

    impl CountingSource {
        fn new(price: f64) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                price,
            }
        }
    }

    #[async_trait::async_trait]
    impl QuoteSource for CountingSource {
        async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Quote {
                name: "금".to_string(),
                price: self.price,
                currency: "KRW".to_string(),
                source: "counting".to_string(),
                timestamp: Utc::now(),
            }])
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl QuoteSource for FailingSource {
        async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
            Err(anyhow!("connection refused"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn snapshot_within_ttl_is_served_from_cache() {
        let source = Arc::new(CountingSource::new(450000.0));
        let service = PriceTableService::new(
            vec![source.clone() as Arc<dyn QuoteSource>],
            Duration::from_secs(600),
        );

        let now = Utc::now();
        let first = service.snapshot_at(now).await;
        let second = service.snapshot_at(now + TimeDelta::seconds(60)).await;

        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_snapshot_is_refreshed() {
        let source = Arc::new(CountingSource::new(450000.0));
        let service = PriceTableService::new(
            vec![source.clone() as Arc<dyn QuoteSource>],
            Duration::from_secs(600),
        );

        let now = Utc::now();
        service.snapshot_at(now).await;
        service.snapshot_at(now + TimeDelta::seconds(601)).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failing_source_degrades_to_missing_prices() {
        let service = PriceTableService::new(
            vec![
                Arc::new(FailingSource) as Arc<dyn QuoteSource>,
                Arc::new(CountingSource::new(450000.0)),
            ],
            Duration::from_secs(600),
        );

        let table = service.snapshot().await;
        assert_eq!(table.resolve("금"), 450000.0);
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn invalid_quotes_are_discarded() {
        let service = PriceTableService::new(
            vec![Arc::new(CountingSource::new(f64::NAN)) as Arc<dyn QuoteSource>],
            Duration::from_secs(600),
        );

        let table = service.snapshot().await;
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn noop_sources_yield_an_empty_table() {
        let service = PriceTableService::new(
            vec![Arc::new(crate::market_data::NoopSource) as Arc<dyn QuoteSource>],
            Duration::from_secs(600),
        );
        assert!(service.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn invalidate_forces_a_refetch() {
        let source = Arc::new(CountingSource::new(1.0));
        let service = PriceTableService::new(
            vec![source.clone() as Arc<dyn QuoteSource>],
            Duration::from_secs(600),
        );

        let now = Utc::now();
        service.snapshot_at(now).await;
        service.invalidate().await;
        service.snapshot_at(now).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
