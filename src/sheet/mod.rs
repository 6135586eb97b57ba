mod client;

pub use client::{parse_records, SheetClient, SheetError};
