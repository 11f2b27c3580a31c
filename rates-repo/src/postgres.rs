//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use rates_types::{
    CurrencyPair, ExchangeRate, ExchangeRateId, ExchangeRateRepository, NewExchangeRate, RepoError,
};

use crate::types::{DbPgRate, map_insert_error};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository. Prices are stored as NUMERIC.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_exchange_rates_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        tracing::debug!("PostgreSQL schema ready");
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ExchangeRateRepository for PostgresRepo {
    async fn get_rate(&self, pair: &CurrencyPair) -> Result<Option<ExchangeRate>, RepoError> {
        let row: Option<DbPgRate> = sqlx::query_as(
            r#"SELECT id, base_currency, quote_currency, bid, ask
               FROM exchange_rates
               WHERE base_currency = $1 AND quote_currency = $2"#,
        )
        .bind(pair.base())
        .bind(pair.quote())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbPgRate::into_domain).transpose()
    }

    async fn add_rate(&self, rate: NewExchangeRate) -> Result<ExchangeRate, RepoError> {
        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO exchange_rates (base_currency, quote_currency, bid, ask, updated_at)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(rate.pair.base())
        .bind(rate.pair.quote())
        .bind(rate.bid)
        .bind(rate.ask)
        .bind(Utc::now())
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
        let result = sqlx::query(
            r#"UPDATE exchange_rates SET bid = $1, ask = $2, updated_at = $3 WHERE id = $4"#,
        )
        .bind(rate.bid)
        .bind(rate.ask)
        .bind(Utc::now())
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
