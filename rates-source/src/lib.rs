//! # Rates Source
//!
//! External exchange rate source backed by the Alpha Vantage
//! `CURRENCY_EXCHANGE_RATE` endpoint.
//!
//! ## Architecture
//!
//! - `alpha_vantage` - HTTP adapter implementing the `ExternalRateSource` port
//! - `retry` - bounded retry decorator around the raw HTTP call
//! - `config` - adapter configuration and startup errors
//! - `error` - per-request failure classification
//!
//! The adapter never surfaces a request failure to its caller: transport
//! errors, non-success statuses and unparseable payloads all become `None`.
//!
//! # Example
//! ```no_run
//! use rates_source::{AlphaVantageSource, SourceConfig};
//! use rates_types::{CurrencyPair, ExternalRateSource};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let source = AlphaVantageSource::new(SourceConfig::new("demo"))?;
//! let pair = CurrencyPair::new("USD", "EUR")?;
//! if let Some(quote) = source.fetch_rate(&pair).await {
//!     println!("{pair}: bid {} ask {}", quote.bid, quote.ask);
//! }
//! # Ok(())
//! # }
//! ```

mod alpha_vantage;
mod config;
mod error;
mod retry;

pub use alpha_vantage::AlphaVantageSource;
pub use config::{ConfigError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, SourceConfig};
pub use error::FetchError;
pub use retry::RetryPolicy;
