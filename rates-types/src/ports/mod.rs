//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod observer;
mod repository;
mod source;

pub use observer::{NoopObserver, RateObserver};
pub use repository::ExchangeRateRepository;
pub use source::ExternalRateSource;
