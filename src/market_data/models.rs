use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One resolved instrument price, keyed by the human-readable label the
/// spreadsheet uses for that instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Sheet label, e.g. "삼성전자" or "달러".
    pub name: String,
    /// Unit price in the reporting currency.
    pub price: f64,
    /// Reporting currency code, e.g. "KRW".
    pub currency: String,
    /// Which source produced this quote.
    pub source: String,
    /// When the quote was fetched.
    pub timestamp: DateTime<Utc>,
}
