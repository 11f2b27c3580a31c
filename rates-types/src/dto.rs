//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to add or update the rate for a currency pair.
///
/// The supplied bid/ask are stored as-is; no external source is consulted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertRateRequest {
    /// The base currency (e.g., USD)
    #[schema(example = "USD")]
    pub base_currency: String,
    /// The quote currency (e.g., EUR)
    #[schema(example = "EUR")]
    pub quote_currency: String,
    /// Bid price
    #[schema(value_type = f64, example = 1.1)]
    pub bid: Decimal,
    /// Ask price
    #[schema(value_type = f64, example = 1.2)]
    pub ask: Decimal,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    #[schema(example = "Exchange rate not available for USD/EUR")]
    pub error: String,
    /// HTTP status code
    #[schema(example = 404)]
    pub code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_upsert_request_accepts_json_numbers() {
        let req: UpsertRateRequest = serde_json::from_str(
            r#"{"base_currency":"USD","quote_currency":"EUR","bid":1.1,"ask":1.2}"#,
        )
        .unwrap();

        assert_eq!(req.base_currency, "USD");
        assert_eq!(req.bid, dec!(1.1));
        assert_eq!(req.ask, dec!(1.2));
    }

    #[test]
    fn test_upsert_request_keeps_fx_quote_digits() {
        let req: UpsertRateRequest = serde_json::from_str(
            r#"{"base_currency":"EUR","quote_currency":"JPY","bid":162.34517,"ask":0.000123456789}"#,
        )
        .unwrap();

        assert_eq!(req.bid, dec!(162.34517));
        assert_eq!(req.ask, dec!(0.000123456789));
    }
}
