//! # Rates Hex
//!
//! Rate resolution service and HTTP adapter for the exchange rate service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (get-with-fallback and upsert)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `observer/` - Default `tracing` reporter for resolution events
//!
//! The service is generic over `R: ExchangeRateRepository` and
//! `S: ExternalRateSource`, allowing different adapters to be injected.

pub mod inbound;
pub mod observer;
pub mod openapi;
pub mod service;

mod pair_lock;


pub use observer::TracingObserver;
pub use service::RateService;
