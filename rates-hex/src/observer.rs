//! Default `RateObserver` that reports resolution events through `tracing`.

use rates_types::{CurrencyPair, ExchangeRate, ExternalRate, RateObserver};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RateObserver for TracingObserver {
    fn cache_hit(&self, rate: &ExchangeRate) {
        tracing::debug!(pair = %rate.pair, id = %rate.id, "Exchange rate served from storage");
    }

    fn cache_miss(&self, pair: &CurrencyPair) {
        tracing::info!(pair = %pair, "Exchange rate not stored, fetching from source");
    }

    fn fetch_succeeded(&self, pair: &CurrencyPair, quote: &ExternalRate) {
        tracing::debug!(pair = %pair, bid = %quote.bid, ask = %quote.ask, "Source returned quote");
    }

    fn fetch_failed(&self, pair: &CurrencyPair) {
        tracing::warn!(pair = %pair, "Source returned no usable quote");
    }

    fn rate_added(&self, rate: &ExchangeRate) {
        tracing::info!(
            pair = %rate.pair,
            id = %rate.id,
            bid = %rate.bid,
            ask = %rate.ask,
            "Exchange rate added"
        );
    }

    fn rate_updated(&self, rate: &ExchangeRate) {
        tracing::info!(
            pair = %rate.pair,
            id = %rate.id,
            bid = %rate.bid,
            ask = %rate.ask,
            "Exchange rate updated"
        );
    }
}
