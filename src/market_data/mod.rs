mod models;
mod provider;
pub mod providers;
mod service;

pub use models::Quote;
pub use provider::{NoopSource, QuoteSource};
pub use service::PriceTableService;
