mod record;

pub use record::{CellValue, RawRecord};
