use serde::{Deserialize, Serialize};

/// One spreadsheet cell of unknown shape: absent, free text, or a value
/// that already deserialized as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Build a cell from a raw CSV field, mapping blank fields to `Empty`.
    pub fn from_field(field: &str) -> Self {
        if field.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(field.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::from_field(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One row from the spreadsheet: an instrument or line-item label plus a
/// quantity-or-amount cell, exactly as the sheet hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub amount: CellValue,
}

impl RawRecord {
    pub fn new(name: impl Into<String>, amount: impl Into<CellValue>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }

    /// A row is blank when both its cells are; blank rows are filtered by
    /// the record source before they ever reach the valuation pipeline.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.amount.is_empty()
    }
}
