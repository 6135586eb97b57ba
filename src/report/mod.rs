mod normalize;
mod pipeline;
mod prices;

pub use normalize::normalize_amount;
pub use pipeline::{value_records, ClassifiedEntry, Valuation};
pub use prices::PriceTable;
