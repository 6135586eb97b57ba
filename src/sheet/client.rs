//! Record source: the household spreadsheet's CSV export endpoint.
//!
//! Each view of the dashboard is one tab of a shared spreadsheet. The
//! export endpoint serves a tab as CSV given its gid; rows come back as
//! (name, amount) pairs with entirely blank rows filtered out before
//! the valuation pipeline ever sees them. Reads only; writes go through
//! a separate channel that is not this client's concern.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use crate::models::{CellValue, RawRecord};

/// Shape violations in the exported CSV.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("row {row} could not be parsed")]
    BadRow {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// Client for the spreadsheet CSV export endpoint.
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: Client,
    export_url: String,
}

impl SheetClient {
    pub fn new(export_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            export_url: export_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one tab and parse it into raw records.
    pub async fn fetch_records(&self, tab: &str) -> Result<Vec<RawRecord>> {
        let body = self.fetch_csv(tab).await?;
        let records = parse_records(&body)
            .with_context(|| format!("malformed CSV export for tab {tab}"))?;
        debug!(tab, rows = records.len(), "fetched sheet records");
        Ok(records)
    }

    async fn fetch_csv(&self, tab: &str) -> Result<String> {
        let url = format!("{}?format=csv&gid={tab}", self.export_url);
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("sheet export request failed for tab {tab}"))?
            .text()
            .await?;
        Ok(body)
    }
}

/// Parse a CSV export body into raw records.
///
/// The first column is the instrument/line-item label, the second the
/// amount cell; extra columns are ignored. There is no header row in the
/// household sheet's tabs. Entirely blank rows are dropped here, per the
/// record-source contract; rows with only one of the two cells filled
/// are kept.
pub fn parse_records(body: &str) -> Result<Vec<RawRecord>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let fields = result.map_err(|source| SheetError::BadRow { row, source })?;

        let name = fields.get(0).unwrap_or("").trim().to_string();
        let amount = CellValue::from_field(fields.get(1).unwrap_or(""));

        let record = RawRecord { name, amount };
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    Ok(records)
}
