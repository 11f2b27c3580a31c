//! Domain models for the exchange rate service.

pub mod pair;
pub mod rate;

pub use pair::CurrencyPair;
pub use rate::{ExchangeRate, ExchangeRateId, ExternalRate, NewExchangeRate};
