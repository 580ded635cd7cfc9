//! Settings API: read all as an object, write a batch of key/value pairs.

use crate::error::AppError;
use crate::handlers::body_to_map;
use crate::response::{ok_json, success_ack};
use crate::service::SettingsService;
use crate::state::AppState;
use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde_json::Value;

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let all = SettingsService::get_all(state.store.as_ref(), &state.model.settings).await?;
    Ok(ok_json(all))
}

/// POST /api/settings — upsert every pair; no atomicity across pairs.
pub async fn post_settings(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let Json(body) = body?;
    let pairs = body_to_map(body)?;
    SettingsService::save_all(state.store.clone(), &state.model.settings, pairs).await?;
    Ok(success_ack())
}
