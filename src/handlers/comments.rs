//! Comment routes nested under their parent resource.

use crate::config::CommentsConfig;
use crate::error::AppError;
use crate::handlers::body_to_map;
use crate::response::ok_json;
use crate::service::CommentService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

async fn list(state: AppState, comments: Arc<CommentsConfig>, parent_id: String) -> Result<impl IntoResponse, AppError> {
    let rows = CommentService::list_for(state.store.as_ref(), &comments, &parent_id).await?;
    Ok(ok_json(rows))
}

async fn create(
    state: AppState,
    comments: Arc<CommentsConfig>,
    parent_id: String,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let row = CommentService::create_for(state.store.as_ref(), &comments, &parent_id, body_to_map(body)?).await?;
    Ok(ok_json(row))
}

/// `GET|POST /{parent}/:id/comments`. The parameter name matches the parent's member route.
pub fn comment_routes(comments: Arc<CommentsConfig>) -> Router<AppState> {
    let path = format!("/{}/:id/comments", comments.parent);
    let for_list = comments.clone();
    Router::new().route(
        &path,
        get(move |State(state): State<AppState>, Path(id): Path<String>| list(state, for_list.clone(), id)).post(
            move |State(state): State<AppState>, Path(id): Path<String>, body: Result<Json<Value>, JsonRejection>| {
                create(state, comments.clone(), id, body)
            },
        ),
    )
}
