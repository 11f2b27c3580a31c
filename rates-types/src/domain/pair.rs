//! Currency pair identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::DomainError;

/// Longest accepted currency code (covers crypto tickers such as `USDT`).
const MAX_CODE_LEN: usize = 10;

/// Ordered `(base, quote)` pair of currency codes.
///
/// Codes are kept exactly as given: `USD/EUR` and `EUR/USD` are different
/// pairs, and so are `USD` and `usd`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct CurrencyPair {
    /// Currency being priced
    #[schema(example = "USD")]
    base_currency: String,
    /// Currency the price is expressed in
    #[schema(example = "EUR")]
    quote_currency: String,
}

impl CurrencyPair {
    /// Creates a pair after checking both codes.
    ///
    /// # Validation
    /// - Each code is 1 to 10 ASCII letters or digits
    pub fn new(
        base_currency: impl Into<String>,
        quote_currency: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let base_currency = base_currency.into();
        let quote_currency = quote_currency.into();

        validate_code(&base_currency)?;
        validate_code(&quote_currency)?;

        Ok(Self {
            base_currency,
            quote_currency,
        })
    }

    /// Returns the base currency code.
    pub fn base(&self) -> &str {
        &self.base_currency
    }

    /// Returns the quote currency code.
    pub fn quote(&self) -> &str {
        &self.quote_currency
    }
}

fn validate_code(code: &str) -> Result<(), DomainError> {
    let valid = !code.is_empty()
        && code.len() <= MAX_CODE_LEN
        && code.bytes().all(|b| b.is_ascii_alphanumeric());

    if !valid {
        return Err(DomainError::InvalidCurrencyCode(code.to_string()));
    }
    Ok(())
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base_currency, self.quote_currency)
    }
}
