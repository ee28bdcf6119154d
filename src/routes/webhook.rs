// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Billing webhook ("Polka") for Chirpy Red upgrades.

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::middleware::auth::require_api_key;
use crate::AppState;
use axum::{extract::State, http::StatusCode, middleware, routing::post, Router};
use serde::Deserialize;
use std::sync::Arc;

const USER_UPGRADED: &str = "user.upgraded";

/// Webhook routes, guarded by the shared API key.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new().route(
        "/webhooks",
        post(handle_event).route_layer(middleware::from_fn_with_state(state, require_api_key)),
    )
}

/// Webhook event payload.
#[derive(Deserialize, Debug)]
struct WebhookEvent {
    event: String,
    #[serde(default)]
    data: Option<WebhookData>,
}

#[derive(Deserialize, Debug)]
struct WebhookData {
    user_id: u64,
}

/// Handle incoming webhook events (POST).
///
/// Only `user.upgraded` does anything; other events are acknowledged.
async fn handle_event(
    State(state): State<Arc<AppState>>,
    AppJson(event): AppJson<WebhookEvent>,
) -> Result<StatusCode> {
    if event.event != USER_UPGRADED {
        tracing::debug!(event = %event.event, "Ignoring unhandled webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let data = event
        .data
        .ok_or_else(|| AppError::Validation("Missing event data".to_string()))?;

    state.user_service.promote_to_privileged(data.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
