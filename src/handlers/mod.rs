//! HTTP handlers: generated resource endpoints plus the settings, login and comment routes.

pub mod comments;
pub mod login;
pub mod resource;
pub mod settings;

use crate::error::AppError;
use crate::store::Record;
use serde_json::Value;

pub(crate) fn body_to_map(value: Value) -> Result<Record, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}
