//! PostgreSQL store over a sqlx pool.

use crate::error::AppError;
use crate::sql::{self, QueryBuf, SqlParam};
use crate::store::{Record, RecordStore, UpdateOutcome};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryScalar;
use sqlx::{PgPool, Postgres};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    /// Schema qualifying every table name.
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
        }
    }

    fn bind_scalar<'q>(q: &'q QueryBuf) -> QueryScalar<'q, Postgres, Value, PgArguments> {
        let mut query = sqlx::query_scalar::<_, Value>(&q.sql);
        for p in &q.params {
            query = match p {
                SqlParam::Text(s) => query.bind(s.as_str()),
                SqlParam::Json(v) => query.bind(v),
            };
        }
        query
    }

    async fn query_many(&self, q: &QueryBuf) -> Result<Vec<Record>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = Self::bind_scalar(q).fetch_all(&self.pool).await?;
        rows.into_iter().map(into_record).collect()
    }

    async fn query_one(&self, q: &QueryBuf) -> Result<Option<Record>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = Self::bind_scalar(q).fetch_optional(&self.pool).await?;
        row.map(into_record).transpose()
    }
}

fn into_record(v: Value) -> Result<Record, AppError> {
    match v {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Store(format!("expected a row object, got {}", other))),
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn select_all(&self, table: &str) -> Result<Vec<Record>, AppError> {
        self.query_many(&sql::select_all(&self.schema, table)).await
    }

    async fn select_where(&self, table: &str, column: &str, value: &str) -> Result<Vec<Record>, AppError> {
        self.query_many(&sql::select_where(&self.schema, table, column, value)).await
    }

    async fn insert(&self, table: &str, record: &Record) -> Result<Record, AppError> {
        let q = sql::insert(&self.schema, table, record);
        self.query_one(&q)
            .await?
            .ok_or_else(|| AppError::Store(format!("insert into {} returned no row", table)))
    }

    async fn update_by_id(
        &self,
        table: &str,
        id_column: &str,
        id: &str,
        patch: &Record,
    ) -> Result<UpdateOutcome, AppError> {
        let rows = self
            .query_many(&sql::update_by_id(&self.schema, table, id_column, id, patch))
            .await?;
        Ok(UpdateOutcome {
            matched: rows.len() as u64,
            rows,
        })
    }

    async fn delete_by_id(&self, table: &str, id_column: &str, id: &str) -> Result<u64, AppError> {
        let q = sql::delete_by_id(&self.schema, table, id_column, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = match p {
                SqlParam::Text(s) => query.bind(s.as_str()),
                SqlParam::Json(v) => query.bind(v),
            };
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn upsert(&self, table: &str, record: &Record, conflict_column: &str) -> Result<Record, AppError> {
        let q = sql::upsert(&self.schema, table, record, conflict_column);
        self.query_one(&q)
            .await?
            .ok_or_else(|| AppError::Store(format!("upsert into {} returned no row", table)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
