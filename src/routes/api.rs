//! `/api` routes built from the resolved model: one generated router per resource, plus settings,
//! login and comments.

use crate::handlers::comments::comment_routes;
use crate::handlers::login::login;
use crate::handlers::resource::resource_routes;
use crate::handlers::settings::{get_settings, post_settings};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

pub fn api_routes(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/settings", get(get_settings).post(post_settings))
        .route("/login", post(login));

    for resource in &state.model.resources {
        tracing::info!(
            endpoint = %resource.endpoint,
            table = %resource.table,
            json_fields = ?resource.json_fields,
            "registering resource"
        );
        router = router.merge(resource_routes(resource.clone()));
    }

    if let Some(comments) = &state.model.comments {
        tracing::info!(parent = %comments.parent, table = %comments.table, "registering comments");
        router = router.merge(comment_routes(Arc::new(comments.clone())));
    }

    router.with_state(state)
}
