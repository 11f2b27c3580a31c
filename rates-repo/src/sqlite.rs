//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use rates_types::{
    CurrencyPair, ExchangeRate, ExchangeRateId, ExchangeRateRepository, NewExchangeRate, RepoError,
};

use crate::types::{DbSqliteRate, map_insert_error};

const SCHEMA: &str = include_str!("../migrations/0001_create_exchange_rates.sql");

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        sqlx::query(SCHEMA).execute(&pool).await?;
        tracing::debug!("SQLite schema ready");

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ExchangeRateRepository for SqliteRepo {
    async fn get_rate(&self, pair: &CurrencyPair) -> Result<Option<ExchangeRate>, RepoError> {
        let row: Option<DbSqliteRate> = sqlx::query_as(
            r#"SELECT id, base_currency, quote_currency, bid, ask
               FROM exchange_rates
               WHERE base_currency = ? AND quote_currency = ?"#,
        )
        .bind(pair.base())
        .bind(pair.quote())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbSqliteRate::into_domain).transpose()
    }

    async fn add_rate(&self, rate: NewExchangeRate) -> Result<ExchangeRate, RepoError> {
        let now = chrono::Utc::now().to_rfc3339();

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO exchange_rates (base_currency, quote_currency, bid, ask, updated_at)
               VALUES (?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(rate.pair.base())
        .bind(rate.pair.quote())
        .bind(rate.bid.to_string())
        .bind(rate.ask.to_string())
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &rate.pair))?;

        Ok(ExchangeRate::from_parts(
            ExchangeRateId::from_i64(id),
            rate.pair,
            rate.bid,
            rate.ask,
        ))
    }

    async fn update_rate(&self, rate: &ExchangeRate) -> Result<(), RepoError> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"UPDATE exchange_rates SET bid = ?, ask = ?, updated_at = ? WHERE id = ?"#,
        )
        .bind(rate.bid.to_string())
        .bind(rate.ask.to_string())
        .bind(&now)
        .bind(rate.id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
