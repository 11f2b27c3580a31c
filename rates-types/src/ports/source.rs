//! External rate source port.
//!
//! Implementations can be HTTP clients, mock providers, etc.

use crate::domain::{CurrencyPair, ExternalRate};

/// Port trait for external market-data providers.
#[async_trait::async_trait]
pub trait ExternalRateSource: Send + Sync + 'static {
    /// Fetches the current bid/ask for `pair`.
    ///
    /// `None` means the source had no usable data. Implementations absorb
    /// transport and parse failures into `None`; they never return a
    /// partially populated quote.
    async fn fetch_rate(&self, pair: &CurrencyPair) -> Option<ExternalRate>;
}
