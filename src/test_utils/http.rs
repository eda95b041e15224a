use axum::{body::Body, response::Response};
use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::Value;

use crate::{
    build_router,
    stores::sqlite::{SQLAppState, create_app_state},
};

/// Get a test server over an empty in-memory database, along with the state
/// it shares so tests can set up and inspect the store directly.
pub(crate) fn get_test_server() -> (SQLAppState, TestServer) {
    let conn = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = create_app_state(conn).expect("Could not create app state.");
    let server =
        TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

    (state, server)
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let content_type_header = response
        .headers()
        .get("content-type")
        .expect("content-type header missing");
    assert_eq!(content_type_header, content_type);
}

pub(crate) async fn read_json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    serde_json::from_slice(&body).expect("Response body is not JSON")
}
