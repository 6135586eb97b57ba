pub mod crypto;
pub mod equity;
pub mod fx;

pub use crypto::CryptoQuoteSource;
pub use equity::EquityQuoteSource;
pub use fx::FxQuoteSource;
