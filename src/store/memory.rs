//! In-memory store for tests and local development. Tables are created on first write.

use crate::error::AppError;
use crate::store::{value_as_text, Record, RecordStore, UpdateOutcome};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

/// Column assigned by the store when an inserted record omits it.
const ID_COLUMN: &str = "id";
const CREATED_AT_COLUMN: &str = "created_at";

/// Simulated store failure: writes to `table` whose `column` equals `value` fail with `message`.
#[derive(Clone, Debug)]
pub struct Rejection {
    pub table: String,
    pub column: String,
    pub value: String,
    pub message: String,
}

impl Rejection {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Rejection {
            table: table.into(),
            column: column.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    fn matches(&self, table: &str, record: &Record) -> bool {
        self.table == table
            && record
                .get(&self.column)
                .map(|v| value_as_text(v) == self.value)
                .unwrap_or(false)
    }
}

pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Record>>>,
    next_id: AtomicI64,
    rejections: Vec<Rejection>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            tables: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            rejections: Vec::new(),
            unavailable: false,
        }
    }

    pub fn with_rejection(mut self, rejection: Rejection) -> Self {
        self.rejections.push(rejection);
        self
    }

    /// Every call fails, as if the remote store were unreachable.
    pub fn unavailable() -> Self {
        MemoryStore {
            unavailable: true,
            ..Self::new()
        }
    }

    /// Seed rows verbatim (no id assignment, no rejection checks).
    pub fn seed(&self, table: &str, rows: Vec<Record>) -> Result<(), AppError> {
        let mut tables = self.write()?;
        tables.entry(table.to_string()).or_default().extend(rows);
        Ok(())
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::Store("store unavailable".into()));
        }
        Ok(())
    }

    fn check_rejections(&self, table: &str, record: &Record) -> Result<(), AppError> {
        match self.rejections.iter().find(|r| r.matches(table, record)) {
            Some(r) => Err(AppError::Store(r.message.clone())),
            None => Ok(()),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Vec<Record>>>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Store("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<Record>>>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Store("memory store lock poisoned".into()))
    }

    fn prepare_insert(&self, record: &Record) -> Record {
        let mut row = record.clone();
        if !row.contains_key(ID_COLUMN) {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            row.insert(ID_COLUMN.into(), Value::Number(id.into()));
        }
        if !row.contains_key(CREATED_AT_COLUMN) {
            row.insert(CREATED_AT_COLUMN.into(), Value::String(chrono::Utc::now().to_rfc3339()));
        }
        row
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn column_matches(row: &Record, column: &str, value: &str) -> bool {
    row.get(column).map(|v| value_as_text(v) == value).unwrap_or(false)
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select_all(&self, table: &str) -> Result<Vec<Record>, AppError> {
        self.check_available()?;
        Ok(self.read()?.get(table).cloned().unwrap_or_default())
    }

    async fn select_where(&self, table: &str, column: &str, value: &str) -> Result<Vec<Record>, AppError> {
        self.check_available()?;
        let tables = self.read()?;
        Ok(tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| column_matches(r, column, value)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert(&self, table: &str, record: &Record) -> Result<Record, AppError> {
        self.check_available()?;
        self.check_rejections(table, record)?;
        let row = self.prepare_insert(record);
        let mut tables = self.write()?;
        let rows = tables.entry(table.to_string()).or_default();
        if let Some(id) = row.get(ID_COLUMN) {
            let id = value_as_text(id);
            if rows.iter().any(|r| column_matches(r, ID_COLUMN, &id)) {
                return Err(AppError::Store(format!(
                    "duplicate key value violates unique constraint \"{}_pkey\"",
                    table
                )));
            }
        }
        rows.push(row.clone());
        Ok(row)
    }

    async fn update_by_id(
        &self,
        table: &str,
        id_column: &str,
        id: &str,
        patch: &Record,
    ) -> Result<UpdateOutcome, AppError> {
        self.check_available()?;
        self.check_rejections(table, patch)?;
        let mut tables = self.write()?;
        let mut outcome = UpdateOutcome::default();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| column_matches(r, id_column, id)) {
                for (k, v) in patch {
                    row.insert(k.clone(), v.clone());
                }
                outcome.matched += 1;
                outcome.rows.push(row.clone());
            }
        }
        Ok(outcome)
    }

    async fn delete_by_id(&self, table: &str, id_column: &str, id: &str) -> Result<u64, AppError> {
        self.check_available()?;
        let mut tables = self.write()?;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|r| !column_matches(r, id_column, id));
        Ok((before - rows.len()) as u64)
    }

    async fn upsert(&self, table: &str, record: &Record, conflict_column: &str) -> Result<Record, AppError> {
        self.check_available()?;
        self.check_rejections(table, record)?;
        let key = record
            .get(conflict_column)
            .map(value_as_text)
            .ok_or_else(|| AppError::Store(format!("null value in column \"{}\"", conflict_column)))?;
        let mut tables = self.write()?;
        let rows = tables.entry(table.to_string()).or_default();
        if let Some(existing) = rows.iter_mut().find(|r| column_matches(r, conflict_column, &key)) {
            for (k, v) in record {
                existing.insert(k.clone(), v.clone());
            }
            return Ok(existing.clone());
        }
        let row = self.prepare_insert(record);
        rows.push(row.clone());
        Ok(row)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }
}
