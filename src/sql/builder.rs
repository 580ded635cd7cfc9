//! Builds parameterized SELECT, INSERT, UPDATE, DELETE and upsert statements.
//! Identifiers come from validated config only; values are always parameters.
//! Every row-returning statement yields one `jsonb` column per row.

use crate::sql::SqlParam;
use crate::store::Record;

const MAIN_ALIAS: &str = "main";
const SOURCE_ALIAS: &str = "src";

/// Quote identifier for PostgreSQL (safe: only from config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

/// Comparison against a path id. Compared as text so integer, uuid and text keys all work.
fn text_match(column: &str, placeholder: u32) -> String {
    format!("{}.{}::text = ${}", MAIN_ALIAS, quoted(column), placeholder)
}

/// `jsonb_populate_record` source for a record parameter: converts each JSON value to the column type.
fn populate_source(table: &str, placeholder: u32) -> String {
    format!("jsonb_populate_record(NULL::{}, ${})", table, placeholder)
}

fn column_list(record: &Record) -> Vec<String> {
    record.keys().map(|k| quoted(k)).collect()
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlParam) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// SELECT every row of the table.
pub fn select_all(schema: &str, table: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT to_jsonb({alias}) FROM {} AS {alias}",
        qualified_table(schema, table),
        alias = MAIN_ALIAS
    );
    q
}

/// SELECT rows whose column equals the value (compared as text).
pub fn select_where(schema: &str, table: &str, column: &str, value: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::text(value));
    q.sql = format!(
        "SELECT to_jsonb({alias}) FROM {} AS {alias} WHERE {}",
        qualified_table(schema, table),
        text_match(column, n),
        alias = MAIN_ALIAS
    );
    q
}

/// INSERT one record. Omitted columns take their table defaults (server-assigned ids).
pub fn insert(schema: &str, table: &str, record: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let qt = qualified_table(schema, table);
    if record.is_empty() {
        q.sql = format!(
            "INSERT INTO {} AS {alias} DEFAULT VALUES RETURNING to_jsonb({alias})",
            qt,
            alias = MAIN_ALIAS
        );
        return q;
    }
    let n = q.push_param(record.into());
    let cols = column_list(record).join(", ");
    q.sql = format!(
        "INSERT INTO {qt} AS {alias} ({cols}) SELECT {cols} FROM {} RETURNING to_jsonb({alias})",
        populate_source(&qt, n),
        alias = MAIN_ALIAS
    );
    q
}

/// UPDATE rows matching the id with the patch columns. An empty patch selects the matching rows unchanged.
pub fn update_by_id(schema: &str, table: &str, id_column: &str, id: &str, patch: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let qt = qualified_table(schema, table);
    if patch.is_empty() {
        let n = q.push_param(SqlParam::text(id));
        q.sql = format!(
            "SELECT to_jsonb({alias}) FROM {qt} AS {alias} WHERE {}",
            text_match(id_column, n),
            alias = MAIN_ALIAS
        );
        return q;
    }
    let record_n = q.push_param(patch.into());
    let id_n = q.push_param(SqlParam::text(id));
    let assignments = patch
        .keys()
        .map(|k| format!("{} = {}.{}", quoted(k), SOURCE_ALIAS, quoted(k)))
        .collect::<Vec<_>>()
        .join(", ");
    q.sql = format!(
        "UPDATE {qt} AS {alias} SET {assignments} FROM {} AS {src} WHERE {} RETURNING to_jsonb({alias})",
        populate_source(&qt, record_n),
        text_match(id_column, id_n),
        alias = MAIN_ALIAS,
        src = SOURCE_ALIAS
    );
    q
}

/// DELETE rows matching the id. Caller reads rows_affected.
pub fn delete_by_id(schema: &str, table: &str, id_column: &str, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::text(id));
    q.sql = format!(
        "DELETE FROM {} AS {} WHERE {}",
        qualified_table(schema, table),
        MAIN_ALIAS,
        text_match(id_column, n)
    );
    q
}

/// INSERT ... ON CONFLICT (conflict_column) DO UPDATE with every other record column.
pub fn upsert(schema: &str, table: &str, record: &Record, conflict_column: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let qt = qualified_table(schema, table);
    let n = q.push_param(record.into());
    let cols = column_list(record).join(", ");
    let mut updates: Vec<String> = record
        .keys()
        .filter(|k| k.as_str() != conflict_column)
        .map(|k| format!("{} = EXCLUDED.{}", quoted(k), quoted(k)))
        .collect();
    if updates.is_empty() {
        // DO NOTHING would return no row on conflict.
        updates.push(format!("{} = EXCLUDED.{}", quoted(conflict_column), quoted(conflict_column)));
    }
    q.sql = format!(
        "INSERT INTO {qt} AS {alias} ({cols}) SELECT {cols} FROM {} ON CONFLICT ({}) DO UPDATE SET {} RETURNING to_jsonb({alias})",
        populate_source(&qt, n),
        quoted(conflict_column),
        updates.join(", "),
        alias = MAIN_ALIAS
    );
    q
}
