// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod admin;
pub mod auth;
pub mod chirps;
pub mod users;
pub mod webhook;

use crate::middleware::count_fileserver_hits;
use crate::AppState;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Readiness probe
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Static files under /app/, counted for /metrics
    let fileserver = Router::new()
        .nest_service("/app", ServeDir::new(&state.config.fileserver_root))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            count_fileserver_hits,
        ));

    Router::new()
        .route("/healthz", get(health_check))
        .merge(admin::routes())
        .merge(chirps::routes(state.clone()))
        .merge(users::routes(state.clone()))
        .merge(auth::routes())
        .merge(webhook::routes(state.clone()))
        .merge(fileserver)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
