//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use rates_types::domain::{CurrencyPair, ExchangeRate};
use rates_types::dto::{ErrorResponse, UpsertRateRequest};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Get the exchange rate for a currency pair
///
/// Served from storage when present. Otherwise fetched from the market-data
/// provider, stored, and returned.
#[utoipa::path(
    get,
    path = "/api/exchangerate/{base}/{quote}",
    tag = "exchange-rates",
    params(
        ("base" = String, Path, description = "Base currency code", example = "USD"),
        ("quote" = String, Path, description = "Quote currency code", example = "EUR")
    ),
    responses(
        (status = 200, description = "Exchange rate", body = ExchangeRate),
        (status = 400, description = "Invalid currency code", body = ErrorResponse),
        (status = 404, description = "Not stored and not available from the provider", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn get_rate() {}

/// Add or update the exchange rate for a currency pair
///
/// The supplied bid and ask are stored as-is; the provider is not consulted.
#[utoipa::path(
    post,
    path = "/api/exchangerate",
    tag = "exchange-rates",
    request_body(
        content = UpsertRateRequest,
        example = json!({"base_currency": "USD", "quote_currency": "EUR", "bid": 1.1, "ask": 1.2})
    ),
    responses(
        (status = 201, description = "Exchange rate stored", body = ExchangeRate,
            headers(("Location" = String, description = "URL of the stored rate"))),
        (status = 400, description = "Invalid currency code or malformed request body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn upsert_rate() {}

/// OpenAPI documentation for the Exchange Rate API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exchange Rate Service API",
        version = "1.0.0",
        description = "Resolves currency-pair exchange rates from storage, falling back to Alpha Vantage for pairs not stored yet.",
        license(name = "MIT"),
    ),
    paths(health, get_rate, upsert_rate),
    components(schemas(CurrencyPair, ExchangeRate, UpsertRateRequest, ErrorResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "exchange-rates", description = "Exchange rate lookup and maintenance"),
    )
)]
pub struct ApiDoc;
