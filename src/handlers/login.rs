//! Login: checks a password against the stored admin password setting.

use crate::error::AppError;
use crate::response::success_ack;
use crate::service::LoginService;
use crate::state::AppState;
use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub password: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let Json(body) = body?;
    LoginService::verify(
        state.store.as_ref(),
        &state.model.settings,
        &state.model.login,
        &body.password,
    )
    .await?;
    Ok(success_ack())
}
