//! Response shaping helpers shared by the handlers.

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Header carrying the number of rows an update or delete matched.
pub const MATCHED_COUNT_HEADER: HeaderName = HeaderName::from_static("x-matched-count");

#[derive(Serialize)]
pub struct SuccessAck {
    pub success: bool,
}

pub fn ok_json<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn success_ack() -> (StatusCode, Json<SuccessAck>) {
    ok_json(SuccessAck { success: true })
}

/// Attach the matched row count to a response.
pub fn with_matched_count(matched: u64, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(MATCHED_COUNT_HEADER, HeaderValue::from(matched));
    response
}
