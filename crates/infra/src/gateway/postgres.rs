//! Postgres-backed row source.
//!
//! The product SELECT statement is supplied by the caller (query construction
//! lives outside this crate). It must accept three parameters:
//!
//! - `$1`: order numbers (`text[]`)
//! - `$2`: shop id (`bigint`)
//! - `$3`: customer group key (`text`)
//!
//! Each result row is returned as a JSON object via `row_to_json`, so column
//! names reach the hydrator unchanged.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::debug;

use storefront_catalog::GatewayError;
use storefront_core::{OrderNumber, ShopContext};

use super::{ProductRow, RowSource};

pub struct PostgresRowSource {
    pool: PgPool,
    statement: String,
}

impl PostgresRowSource {
    pub fn new(pool: PgPool, statement: impl Into<String>) -> Self {
        Self {
            pool,
            statement: statement.into(),
        }
    }

    /// Open a connection pool and wrap it.
    pub async fn connect(
        database_url: &str,
        statement: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool, statement))
    }

    fn wrapped_statement(&self) -> String {
        format!("SELECT row_to_json(p) AS row FROM ({}) p", self.statement)
    }
}

#[async_trait]
impl RowSource for PostgresRowSource {
    async fn fetch_rows(
        &self,
        numbers: &[OrderNumber],
        context: &ShopContext,
    ) -> Result<Vec<ProductRow>, GatewayError> {
        let sql = self.wrapped_statement();
        let numbers: Vec<String> = numbers.iter().cloned().map(String::from).collect();

        let rows = sqlx::query(&sql)
            .bind(numbers)
            .bind(i64::from(context.shop().id.get()))
            .bind(context.current_customer_group().key.clone())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("fetch_products", e))?;

        debug!(rows = rows.len(), "product query executed");

        rows.iter()
            .map(|row| {
                let value: JsonValue = row
                    .try_get("row")
                    .map_err(|e| GatewayError::query(format!("failed to read row: {e}")))?;
                match value {
                    JsonValue::Object(map) => Ok(map),
                    other => Err(GatewayError::query(format!(
                        "expected a JSON object per row, got {other}"
                    ))),
                }
            })
            .collect()
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> GatewayError {
    match err {
        sqlx::Error::Database(db_err) => {
            GatewayError::query(format!("database error in {operation}: {}", db_err.message()))
        }
        sqlx::Error::PoolTimedOut => {
            GatewayError::query(format!("connection pool timed out in {operation}"))
        }
        other => GatewayError::query(format!("{operation}: {other}")),
    }
}
