//! Store capability: the remote tabular service behind every route.
//!
//! Handlers never reach a connection directly; they go through an injected
//! [`RecordStore`], which lets tests substitute [`MemoryStore`] for PostgreSQL.

mod memory;
mod postgres;

pub use memory::{MemoryStore, Rejection};
pub use postgres::PgStore;

use crate::error::AppError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A row as the store returns it: column name -> JSON value. Shape is owned by the store's schema.
pub type Record = Map<String, Value>;

/// Result of an update: how many rows matched, and the rows after the update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub rows: Vec<Record>,
}

impl UpdateOutcome {
    pub fn first(self) -> Option<Record> {
        self.rows.into_iter().next()
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every row of the table, in store order.
    async fn select_all(&self, table: &str) -> Result<Vec<Record>, AppError>;

    /// Rows whose column equals the value (compared as text).
    async fn select_where(&self, table: &str, column: &str, value: &str) -> Result<Vec<Record>, AppError>;

    /// Insert one row; the store assigns any omitted identifier. Returns the inserted row.
    async fn insert(&self, table: &str, record: &Record) -> Result<Record, AppError>;

    /// Update rows whose id column equals `id`. Zero matches is not an error.
    async fn update_by_id(
        &self,
        table: &str,
        id_column: &str,
        id: &str,
        patch: &Record,
    ) -> Result<UpdateOutcome, AppError>;

    /// Delete rows whose id column equals `id`. Returns the number of rows removed.
    async fn delete_by_id(&self, table: &str, id_column: &str, id: &str) -> Result<u64, AppError>;

    /// Insert, or update the existing row that conflicts on `conflict_column`.
    async fn upsert(&self, table: &str, record: &Record, conflict_column: &str) -> Result<Record, AppError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Text form of a JSON value for id comparisons: strings unquoted, everything else as JSON.
pub(crate) fn value_as_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
