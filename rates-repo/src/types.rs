//! Database row types with backend-specific column representations.

use sqlx::FromRow;

use rates_types::{CurrencyPair, ExchangeRate, ExchangeRateId, RepoError};

use rust_decimal::Decimal;
#[cfg(feature = "sqlite")]
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Exchange rate row from SQLite. Prices are stored as TEXT so no
/// precision is lost to REAL.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct DbSqliteRate {
    pub id: i64,
    pub base_currency: String,
    pub quote_currency: String,
    pub bid: String,
    pub ask: String,
}

/// Exchange rate row from PostgreSQL (NUMERIC prices).
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct DbPgRate {
    pub id: i64,
    pub base_currency: String,
    pub quote_currency: String,
    pub bid: Decimal,
    pub ask: Decimal,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

fn to_domain(
    id: i64,
    base: String,
    quote: String,
    bid: Decimal,
    ask: Decimal,
) -> Result<ExchangeRate, RepoError> {
    let pair = CurrencyPair::new(base, quote).map_err(RepoError::Domain)?;
    Ok(ExchangeRate::from_parts(ExchangeRateId::from_i64(id), pair, bid, ask))
}

#[cfg(feature = "sqlite")]
pub fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, RepoError> {
    Decimal::from_str(raw)
        .map_err(|e| RepoError::Database(format!("Invalid {} value {:?}: {}", column, raw, e)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
impl DbSqliteRate {
    /// Convert database row to domain ExchangeRate.
    pub fn into_domain(self) -> Result<ExchangeRate, RepoError> {
        let bid = parse_decimal("bid", &self.bid)?;
        let ask = parse_decimal("ask", &self.ask)?;
        to_domain(self.id, self.base_currency, self.quote_currency, bid, ask)
    }
}

#[cfg(feature = "postgres")]
impl DbPgRate {
    /// Convert database row to domain ExchangeRate.
    pub fn into_domain(self) -> Result<ExchangeRate, RepoError> {
        to_domain(self.id, self.base_currency, self.quote_currency, self.bid, self.ask)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Maps an insert failure, turning a unique-index hit on the pair into
/// `RepoError::Conflict`.
pub fn map_insert_error(err: sqlx::Error, pair: &CurrencyPair) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Conflict(format!("Exchange rate for {} already exists", pair))
        }
        _ => RepoError::Database(err.to_string()),
    }
}
