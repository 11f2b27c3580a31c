//! Exchange rate entity and quote value objects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::pair::CurrencyPair;

/// Identity assigned to an exchange rate by the storage adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ExchangeRateId(i64);

impl ExchangeRateId {
    /// Wraps a storage-generated key.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ExchangeRateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bid/ask quote as reported by an external market-data source.
///
/// Transient: never stored as-is, always turned into a [`NewExchangeRate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalRate {
    pub bid: Decimal,
    pub ask: Decimal,
}

impl ExternalRate {
    pub fn new(bid: Decimal, ask: Decimal) -> Self {
        Self { bid, ask }
    }
}

/// An exchange rate that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExchangeRate {
    pub pair: CurrencyPair,
    pub bid: Decimal,
    pub ask: Decimal,
}

impl NewExchangeRate {
    pub fn new(pair: CurrencyPair, bid: Decimal, ask: Decimal) -> Self {
        Self { pair, bid, ask }
    }

    /// Builds an unsaved rate from an externally fetched quote.
    pub fn from_external(pair: CurrencyPair, quote: ExternalRate) -> Self {
        Self::new(pair, quote.bid, quote.ask)
    }
}

/// The current bid/ask for one currency pair.
///
/// One entity exists per pair. Updates change `bid` and `ask` in place and
/// keep the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRate {
    /// Storage-assigned identifier
    #[schema(value_type = i64, example = 1)]
    pub id: ExchangeRateId,
    pub pair: CurrencyPair,
    /// Bid price
    #[schema(value_type = f64, example = 1.1)]
    pub bid: Decimal,
    /// Ask price
    #[schema(value_type = f64, example = 1.2)]
    pub ask: Decimal,
}

impl ExchangeRate {
    /// Reconstructs an exchange rate from persistence.
    pub fn from_parts(id: ExchangeRateId, pair: CurrencyPair, bid: Decimal, ask: Decimal) -> Self {
        Self { id, pair, bid, ask }
    }

    /// Replaces the quote, keeping identity and pair.
    pub fn update_quote(&mut self, bid: Decimal, ask: Decimal) {
        self.bid = bid;
        self.ask = ask;
    }
}
