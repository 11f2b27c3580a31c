//! Alpha Vantage `CURRENCY_EXCHANGE_RATE` adapter.

use std::str::FromStr;

use async_trait::async_trait;
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::Deserialize;

use rates_types::{CurrencyPair, ExternalRate, ExternalRateSource};

use crate::config::{ConfigError, SourceConfig};
use crate::error::FetchError;
use crate::retry::RetryPolicy;

const FUNCTION: &str = "CURRENCY_EXCHANGE_RATE";
const BID_FIELD: &str = "8. Bid Price";
const ASK_FIELD: &str = "9. Ask Price";

/// Fetches live bid/ask quotes from Alpha Vantage.
pub struct AlphaVantageSource {
    client: Client,
    endpoint: Url,
    api_key: String,
    retry: RetryPolicy,
}

impl AlphaVantageSource {
    /// Builds the adapter. Fails if the API key is missing or blank.
    pub fn new(config: SourceConfig) -> Result<Self, ConfigError> {
        let Some(api_key) = config.api_key.filter(|key| !key.trim().is_empty()) else {
            tracing::error!("Alpha Vantage API key is not configured");
            return Err(ConfigError::MissingApiKey);
        };

        let raw = format!("{}/query", config.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder().timeout(config.timeout).build()?;

        tracing::debug!(
            endpoint = %endpoint,
            max_attempts = config.retry.max_attempts(),
            "Alpha Vantage source configured"
        );

        Ok(Self {
            client,
            endpoint,
            api_key,
            retry: config.retry,
        })
    }

    async fn fetch(&self, pair: &CurrencyPair) -> Result<ExternalRate, FetchError> {
        let body = self.retry.run(|| self.request_once(pair)).await?;
        parse_exchange_rate(&body)
    }

    /// One raw HTTP call. Non-success statuses are errors so the retry
    /// policy can classify them.
    async fn request_once(&self, pair: &CurrencyPair) -> Result<String, FetchError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("function", FUNCTION),
                ("from_currency", pair.base()),
                ("to_currency", pair.quote()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ExternalRateSource for AlphaVantageSource {
    #[tracing::instrument(skip(self, pair), fields(pair = %pair))]
    async fn fetch_rate(&self, pair: &CurrencyPair) -> Option<ExternalRate> {
        match self.fetch(pair).await {
            Ok(quote) => {
                tracing::info!(bid = %quote.bid, ask = %quote.ask, "Fetched exchange rate");
                Some(quote)
            }
            Err(err) => {
                tracing::warn!(error = %err, "No usable exchange rate from Alpha Vantage");
                None
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response parsing
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    #[serde(rename = "Realtime Currency Exchange Rate")]
    realtime: Option<RealtimeRate>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RealtimeRate {
    #[serde(rename = "8. Bid Price")]
    bid_price: Option<String>,
    #[serde(rename = "9. Ask Price")]
    ask_price: Option<String>,
}

fn parse_exchange_rate(body: &str) -> Result<ExternalRate, FetchError> {
    let response: ExchangeRateResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let Some(realtime) = response.realtime else {
        return Err(match response
            .error_message
            .or(response.note)
            .or(response.information)
        {
            Some(message) => FetchError::Upstream(message),
            None => FetchError::Parse("missing \"Realtime Currency Exchange Rate\"".into()),
        });
    };

    let bid = parse_price(BID_FIELD, realtime.bid_price)?;
    let ask = parse_price(ASK_FIELD, realtime.ask_price)?;
    Ok(ExternalRate::new(bid, ask))
}

fn parse_price(field: &str, raw: Option<String>) -> Result<Decimal, FetchError> {
    let raw = raw.ok_or_else(|| FetchError::Parse(format!("missing field {field:?}")))?;
    let trimmed = raw.trim();

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| FetchError::Parse(format!("{field:?} is not a number ({raw:?}): {e}")))
}
