// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File server hit counter endpoints.

use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/reset", post(reset))
}

async fn metrics(State(state): State<Arc<AppState>>) -> String {
    format!("Hits: {}", state.fileserver_hits.load(Ordering::Relaxed))
}

async fn reset(State(state): State<Arc<AppState>>) -> String {
    state.fileserver_hits.store(0, Ordering::Relaxed);
    tracing::info!("File server hit counter reset");
    "Metrics reset to 0".to_string()
}
