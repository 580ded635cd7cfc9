//! Query parameters bound by the PostgreSQL store.

use serde_json::Value;

/// A value bound to a placeholder. Records travel as one JSONB parameter and are
/// expanded server-side with `jsonb_populate_record`, so column types come from the table.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Text(String),
    Json(Value),
}

impl SqlParam {
    pub fn text(s: impl Into<String>) -> Self {
        SqlParam::Text(s.into())
    }
}

impl From<&crate::store::Record> for SqlParam {
    fn from(record: &crate::store::Record) -> Self {
        SqlParam::Json(Value::Object(record.clone()))
    }
}
