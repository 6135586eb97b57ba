//! Fail-soft numeric coercion for spreadsheet cells.
//!
//! Sheet cells arrive as free text ("1,234.5", "₩3,000", "-42") or as
//! numbers, and a report render must never die on a malformed cell. Every
//! input therefore coerces to a number, with `0.0` as the fallback for
//! anything unparseable. Callers that need hard errors on bad input do
//! not belong here.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::CellValue;

/// First signed integer or decimal substring in a cell.
static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("numeric pattern compiles"));

/// Coerce a cell of unknown shape into a number.
///
/// - Empty cells are `0.0`.
/// - Text cells have thousands separators stripped, then the first
///   numeric substring is parsed; no numeric substring means `0.0`.
/// - Numeric cells pass through unchanged.
///
/// Never fails: malformed input degrades to `0.0` rather than erroring,
/// so one garbage cell costs one line item, not the whole report.
pub fn normalize_amount(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Empty => 0.0,
        CellValue::Number(n) => *n,
        CellValue::Text(s) => parse_text(s),
    }
}

fn parse_text(s: &str) -> f64 {
    let cleaned = s.replace(',', "");
    match NUMERIC_RE.find(&cleaned) {
        Some(m) => m.as_str().parse().unwrap_or(0.0),
        None => 0.0,
    }
}
