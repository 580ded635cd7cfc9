//! Site settings: a key/value table read as one object and written in concurrent batches.

use crate::config::SettingsConfig;
use crate::error::AppError;
use crate::store::{value_as_text, Record, RecordStore};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::task::JoinSet;

pub struct SettingsService;

impl SettingsService {
    /// All settings as `{ key: value }`.
    pub async fn get_all(store: &dyn RecordStore, settings: &SettingsConfig) -> Result<Map<String, Value>, AppError> {
        let rows = store.select_all(&settings.table).await?;
        let mut out = Map::new();
        for row in rows {
            let Some(key) = row.get(&settings.key_column) else {
                continue;
            };
            let value = row.get(&settings.value_column).cloned().unwrap_or(Value::Null);
            out.insert(value_as_text(key), value);
        }
        Ok(out)
    }

    /// Value stored under one key, as text.
    pub async fn get(
        store: &dyn RecordStore,
        settings: &SettingsConfig,
        key: &str,
    ) -> Result<Option<String>, AppError> {
        let rows = store.select_where(&settings.table, &settings.key_column, key).await?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.get(&settings.value_column).cloned())
            .filter(|v| !v.is_null())
            .map(|v| value_as_text(&v)))
    }

    /// Upsert every pair concurrently and wait for all of them. Returns the first error observed;
    /// pairs that succeeded stay written.
    pub async fn save_all(
        store: Arc<dyn RecordStore>,
        settings: &SettingsConfig,
        pairs: Map<String, Value>,
    ) -> Result<(), AppError> {
        let mut tasks = JoinSet::new();
        for (key, value) in pairs {
            let store = store.clone();
            let settings = settings.clone();
            tasks.spawn(async move {
                let mut row = Record::new();
                row.insert(settings.key_column.clone(), Value::String(key.clone()));
                row.insert(settings.value_column.clone(), Value::String(value_as_text(&value)));
                store
                    .upsert(&settings.table, &row, &settings.key_column)
                    .await
                    .map_err(|e| (key, e))
            });
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(_)) => {}
                Ok(Err((key, e))) => {
                    tracing::warn!(key = %key, error = %e, "setting upsert failed");
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    tracing::error!(error = %e, "setting upsert task failed");
                    first_error.get_or_insert(AppError::Store(e.to_string()));
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
