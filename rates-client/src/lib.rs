//! # Exchange Rate Client SDK
//!
//! A typed Rust client for the Exchange Rate API.

use rates_types::{ExchangeRate, UpsertRateRequest};
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Exchange Rate API client.
pub struct RatesClient {
    base_url: String,
    http: Client,
}

impl RatesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Gets the rate for a pair. The server fetches it from its provider if
    /// it is not stored yet.
    pub async fn get_rate(&self, base: &str, quote: &str) -> Result<ExchangeRate, ClientError> {
        let url = self.url(&["api", "exchangerate", base, quote])?;
        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    /// Adds or updates the rate for a pair.
    pub async fn set_rate(
        &self,
        base: &str,
        quote: &str,
        bid: Decimal,
        ask: Decimal,
    ) -> Result<ExchangeRate, ClientError> {
        let req = UpsertRateRequest {
            base_currency: base.to_string(),
            quote_currency: quote.to_string(),
            bid,
            ask,
        };
        let url = self.url(&["api", "exchangerate"])?;
        let resp = self.http.post(url).json(&req).send().await?;
        self.handle_response(resp).await
    }

    /// Joins percent-encoded path segments onto the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
