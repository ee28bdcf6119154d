// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request counter for the static file server.

use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Count every request that reaches the file server.
pub async fn count_fileserver_hits(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    state.fileserver_hits.fetch_add(1, Ordering::Relaxed);
    next.run(request).await
}
