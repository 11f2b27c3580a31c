//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory) implement this trait.

use crate::domain::{CurrencyPair, ExchangeRate, NewExchangeRate};
use crate::error::RepoError;

/// Storage for the current rate of each currency pair.
///
/// Each call only needs single-row atomicity. Lookups match the pair
/// exactly, without normalization.
#[async_trait::async_trait]
pub trait ExchangeRateRepository: Send + Sync + 'static {
    /// Gets the stored rate for a pair.
    async fn get_rate(&self, pair: &CurrencyPair) -> Result<Option<ExchangeRate>, RepoError>;

    /// Inserts a new rate and returns it with its assigned identity.
    ///
    /// Returns `RepoError::Conflict` if the pair is already stored.
    async fn add_rate(&self, rate: NewExchangeRate) -> Result<ExchangeRate, RepoError>;

    /// Persists the bid/ask of an existing rate.
    ///
    /// Returns `RepoError::NotFound` if no row has this identity.
    async fn update_rate(&self, rate: &ExchangeRate) -> Result<(), RepoError>;
}
