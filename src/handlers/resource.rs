//! Resource endpoint factory: list, create, update, delete handlers for one descriptor.

use crate::config::ResourceDescriptor;
use crate::error::AppError;
use crate::handlers::body_to_map;
use crate::response::{ok_json, success_ack, with_matched_count};
use crate::service::ResourceService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

async fn list(state: AppState, resource: Arc<ResourceDescriptor>) -> Result<impl IntoResponse, AppError> {
    let rows = ResourceService::list(state.store.as_ref(), &resource).await?;
    Ok(ok_json(rows))
}

async fn create(
    state: AppState,
    resource: Arc<ResourceDescriptor>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let row = ResourceService::create(state.store.as_ref(), &resource, body_to_map(body)?).await?;
    Ok(ok_json(row))
}

async fn update(
    state: AppState,
    resource: Arc<ResourceDescriptor>,
    id: String,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body?;
    let outcome = ResourceService::update(state.store.as_ref(), &resource, &id, body_to_map(body)?).await?;
    let matched = outcome.matched;
    Ok(with_matched_count(matched, ok_json(outcome.first())))
}

async fn delete(state: AppState, resource: Arc<ResourceDescriptor>, id: String) -> Result<Response, AppError> {
    let matched = ResourceService::delete(state.store.as_ref(), &resource, &id).await?;
    Ok(with_matched_count(matched, success_ack()))
}

/// Routes for one resource: `GET|POST /{endpoint}` and `PUT|DELETE /{endpoint}/:id`.
/// Each handler closes over the shared descriptor; resources share no mutable state.
pub fn resource_routes(resource: Arc<ResourceDescriptor>) -> Router<AppState> {
    let collection = format!("/{}", resource.endpoint);
    let member = format!("/{}/:id", resource.endpoint);
    let (for_list, for_create, for_update, for_delete) =
        (resource.clone(), resource.clone(), resource.clone(), resource);

    Router::new()
        .route(
            &collection,
            get(move |State(state): State<AppState>| list(state, for_list.clone())).post(
                move |State(state): State<AppState>, body: Result<Json<Value>, JsonRejection>| {
                    create(state, for_create.clone(), body)
                },
            ),
        )
        .route(
            &member,
            put(
                move |State(state): State<AppState>,
                      Path(id): Path<String>,
                      body: Result<Json<Value>, JsonRejection>| {
                    update(state, for_update.clone(), id, body)
                },
            )
            .delete(move |State(state): State<AppState>, Path(id): Path<String>| {
                delete(state, for_delete.clone(), id)
            }),
        )
}
