//! The JSON response for unknown routes and missing records.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// A route handler that responds with 404 Not Found, used as the router fallback.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// A 404 Not Found response with the body `{"detail": "not found"}`.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "not found" })),
    )
        .into_response()
}
