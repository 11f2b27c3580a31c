//! Instrumentation hooks for rate resolution.

use std::sync::Arc;

use crate::domain::{CurrencyPair, ExchangeRate, ExternalRate};

/// Receives resolution events from the rate service.
///
/// Every method defaults to a no-op. Hooks must not fail or block; the
/// service ignores them for correctness.
pub trait RateObserver: Send + Sync + 'static {
    fn cache_hit(&self, _rate: &ExchangeRate) {}

    fn cache_miss(&self, _pair: &CurrencyPair) {}

    fn fetch_succeeded(&self, _pair: &CurrencyPair, _quote: &ExternalRate) {}

    fn fetch_failed(&self, _pair: &CurrencyPair) {}

    fn rate_added(&self, _rate: &ExchangeRate) {}

    fn rate_updated(&self, _rate: &ExchangeRate) {}
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RateObserver for NoopObserver {}

impl<T: RateObserver + ?Sized> RateObserver for Arc<T> {
    fn cache_hit(&self, rate: &ExchangeRate) {
        (**self).cache_hit(rate)
    }

    fn cache_miss(&self, pair: &CurrencyPair) {
        (**self).cache_miss(pair)
    }

    fn fetch_succeeded(&self, pair: &CurrencyPair, quote: &ExternalRate) {
        (**self).fetch_succeeded(pair, quote)
    }

    fn fetch_failed(&self, pair: &CurrencyPair) {
        (**self).fetch_failed(pair)
    }

    fn rate_added(&self, rate: &ExchangeRate) {
        (**self).rate_added(rate)
    }

    fn rate_updated(&self, rate: &ExchangeRate) {
        (**self).rate_updated(rate)
    }
}
