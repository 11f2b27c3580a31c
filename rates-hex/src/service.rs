//! Rate Resolution Service
//!
//! Orchestrates the storage and external source ports.
//! Contains NO infrastructure logic - pure business orchestration.

use rust_decimal::Decimal;

use rates_types::{
    AppError, CurrencyPair, ExchangeRate, ExchangeRateRepository, ExternalRateSource,
    NewExchangeRate, RateObserver, RepoError,
};

use crate::observer::TracingObserver;
use crate::pair_lock::PairLocks;

/// Application service for exchange rate operations.
///
/// Generic over `R: ExchangeRateRepository` and `S: ExternalRateSource` - the
/// adapters are injected at compile time. This enables:
/// - Swapping storage or market-data providers without code changes
/// - Testing with in-memory mocks
/// - Compile-time checks for port implementation
pub struct RateService<R: ExchangeRateRepository, S: ExternalRateSource> {
    repo: R,
    source: S,
    observer: Box<dyn RateObserver>,
    locks: PairLocks,
}

impl<R: ExchangeRateRepository, S: ExternalRateSource> RateService<R, S> {
    /// Creates a new service that reports events through `tracing`.
    pub fn new(repo: R, source: S) -> Self {
        Self {
            repo,
            source,
            observer: Box::new(TracingObserver),
            locks: PairLocks::new(),
        }
    }

    /// Replaces the event observer.
    pub fn with_observer(mut self, observer: impl RateObserver) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the external rate source.
    pub fn source(&self) -> &S {
        &self.source
    }

    #[cfg(test)]
    pub(crate) fn held_locks(&self) -> usize {
        self.locks.len()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Resolve
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns the stored rate for a pair, fetching and storing it first if
    /// it is not stored yet.
    ///
    /// Fails with `SourceUnavailable` when the pair is not stored and the
    /// source has no usable quote. Nothing is written in that case.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, base: &str, quote: &str) -> Result<ExchangeRate, AppError> {
        let pair = CurrencyPair::new(base, quote)?;

        if let Some(rate) = self.repo.get_rate(&pair).await? {
            self.observer.cache_hit(&rate);
            return Ok(rate);
        }

        let _lock = self.locks.acquire(&pair).await;

        // Another caller may have stored it while we waited.
        if let Some(rate) = self.repo.get_rate(&pair).await? {
            self.observer.cache_hit(&rate);
            return Ok(rate);
        }

        self.observer.cache_miss(&pair);

        let Some(fetched) = self.source.fetch_rate(&pair).await else {
            self.observer.fetch_failed(&pair);
            return Err(AppError::SourceUnavailable { pair });
        };
        self.observer.fetch_succeeded(&pair, &fetched);

        match self
            .repo
            .add_rate(NewExchangeRate::from_external(pair.clone(), fetched))
            .await
        {
            Ok(rate) => {
                self.observer.rate_added(&rate);
                Ok(rate)
            }
            Err(RepoError::Conflict(msg)) => {
                tracing::info!(%pair, %msg, "Pair stored by another writer, returning stored rate");
                self.stored_rate(&pair).await
            }
            Err(e) => Err(e.into()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Upsert
    // ─────────────────────────────────────────────────────────────────────────────

    /// Stores the given quote for a pair, adding or updating as needed.
    ///
    /// The quote is stored exactly as given. Never consults the external
    /// source.
    #[tracing::instrument(skip(self))]
    pub async fn upsert(
        &self,
        base: &str,
        quote: &str,
        bid: Decimal,
        ask: Decimal,
    ) -> Result<ExchangeRate, AppError> {
        let pair = CurrencyPair::new(base, quote)?;

        let _lock = self.locks.acquire(&pair).await;

        let existing = match self.repo.get_rate(&pair).await? {
            Some(rate) => rate,
            None => {
                match self
                    .repo
                    .add_rate(NewExchangeRate::new(pair.clone(), bid, ask))
                    .await
                {
                    Ok(rate) => {
                        self.observer.rate_added(&rate);
                        return Ok(rate);
                    }
                    Err(RepoError::Conflict(msg)) => {
                        tracing::info!(%pair, %msg, "Pair stored by another writer, updating it");
                        self.stored_rate(&pair).await?
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };

        self.apply_quote(existing, bid, ask).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────────

    async fn apply_quote(
        &self,
        mut rate: ExchangeRate,
        bid: Decimal,
        ask: Decimal,
    ) -> Result<ExchangeRate, AppError> {
        rate.update_quote(bid, ask);
        self.repo.update_rate(&rate).await?;
        self.observer.rate_updated(&rate);
        Ok(rate)
    }

    /// Re-reads a pair after an insert conflict. The row must exist by now.
    async fn stored_rate(&self, pair: &CurrencyPair) -> Result<ExchangeRate, AppError> {
        self.repo.get_rate(pair).await?.ok_or_else(|| {
            AppError::Internal(format!(
                "Exchange rate for {} conflicted on insert but is not stored",
                pair
            ))
        })
    }
}
