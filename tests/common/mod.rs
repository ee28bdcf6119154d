// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response},
};
use chirpy::config::Config;
use chirpy::db::JsonStore;
use chirpy::routes::create_router;
use chirpy::AppState;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;

/// Fresh store in its own temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped, so keep it
/// alive for the duration of the test.
#[allow(dead_code)]
pub async fn test_store() -> (JsonStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = JsonStore::open(dir.path().join("database.json"))
        .await
        .expect("Failed to open store");
    (store, dir)
}

/// Test state backed by a fresh store.
#[allow(dead_code)]
pub async fn test_state() -> (Arc<AppState>, TempDir) {
    let (store, dir) = test_store().await;
    let config = Config {
        db_path: store.path().to_path_buf(),
        fileserver_root: dir.path().to_path_buf(),
        ..Config::default()
    };
    (Arc::new(AppState::new(config, store)), dir)
}

/// Create a test app backed by a fresh store.
/// Returns the router, the shared state and the temp dir guard.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>, TempDir) {
    let (state, dir) = test_state().await;
    (create_router(state.clone()), state, dir)
}

/// Build a request with an optional JSON body and Authorization header.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn text_body(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
