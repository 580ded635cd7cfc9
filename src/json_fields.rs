//! JSON field coercion: list-valued columns are stored as JSON text, decoded on read, encoded on write.
//!
//! An explicit `null` on write is treated like a missing field and stored as `"[]"`.

use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Text form written for a missing JSON field.
pub const EMPTY_LIST_TEXT: &str = "[]";

fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Decode one stored value. Strings are parsed (failure -> `[]`), falsy values become `[]`,
/// structured values pass through.
pub fn decode_value(stored: Option<Value>) -> Value {
    match stored {
        None => Value::Array(Vec::new()),
        Some(v) if is_falsy(&v) => Value::Array(Vec::new()),
        Some(Value::String(s)) => serde_json::from_str(&s).unwrap_or_else(|_| Value::Array(Vec::new())),
        Some(v) => v,
    }
}

/// Encode one value for storage. Strings pass through unchanged; missing or null become `"[]"`.
pub fn encode_value(value: Option<Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::String(EMPTY_LIST_TEXT.into()),
        Some(Value::String(s)) => Value::String(s),
        Some(v) => Value::String(v.to_string()),
    }
}

/// Decode every JSON field of a record in place. Absent fields are added as `[]`.
pub fn decode_record(record: &mut Map<String, Value>, fields: &BTreeSet<String>) {
    for field in fields {
        let stored = record.remove(field);
        record.insert(field.clone(), decode_value(stored));
    }
}

/// Encode every JSON field of a record in place. Absent fields are written as `"[]"`.
pub fn encode_record(record: &mut Map<String, Value>, fields: &BTreeSet<String>) {
    for field in fields {
        let value = record.remove(field);
        record.insert(field.clone(), encode_value(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn decodes_text_encoded_lists() {
        assert_eq!(decode_value(Some(json!("[1,2,3]"))), json!([1, 2, 3]));
        assert_eq!(decode_value(Some(json!("[\"rust\",\"axum\"]"))), json!(["rust", "axum"]));
    }

    #[test]
    fn unparseable_text_decodes_to_empty_list() {
        assert_eq!(decode_value(Some(json!("rust, axum"))), json!([]));
    }

    #[test]
    fn absent_and_falsy_decode_to_empty_list() {
        assert_eq!(decode_value(None), json!([]));
        assert_eq!(decode_value(Some(Value::Null)), json!([]));
        assert_eq!(decode_value(Some(json!(""))), json!([]));
        assert_eq!(decode_value(Some(json!(false))), json!([]));
        assert_eq!(decode_value(Some(json!(0))), json!([]));
    }

    #[test]
    fn structured_values_pass_through() {
        assert_eq!(decode_value(Some(json!(["a"]))), json!(["a"]));
        assert_eq!(decode_value(Some(json!({"k": 1}))), json!({"k": 1}));
    }

    #[test]
    fn encode_keeps_strings_and_serializes_the_rest() {
        assert_eq!(encode_value(Some(json!("[1]"))), json!("[1]"));
        assert_eq!(encode_value(Some(json!([1, 2]))), json!("[1,2]"));
        assert_eq!(encode_value(None), json!("[]"));
        assert_eq!(encode_value(Some(Value::Null)), json!("[]"));
    }

    #[test]
    fn record_helpers_touch_only_listed_fields() {
        let mut record = json!({ "title": "A", "tags": ["x"] }).as_object().cloned().unwrap();
        encode_record(&mut record, &fields(&["tags", "images"]));
        assert_eq!(record["title"], json!("A"));
        assert_eq!(record["tags"], json!("[\"x\"]"));
        assert_eq!(record["images"], json!("[]"));

        decode_record(&mut record, &fields(&["tags", "images"]));
        assert_eq!(record["tags"], json!(["x"]));
        assert_eq!(record["images"], json!([]));
        assert_eq!(record["title"], json!("A"));
    }
}
