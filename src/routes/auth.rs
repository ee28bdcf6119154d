// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login and token routes.

use crate::error::Result;
use crate::extract::AppJson;
use crate::middleware::auth::bearer_token;
use crate::AppState;
use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/revoke", post(revoke))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
    /// Requested session lifetime; 0 or too large means the configured maximum
    #[serde(default)]
    expires_in_seconds: u64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub id: u64,
    pub email: String,
    pub is_chirpy_red: bool,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub token: String,
}

/// Check credentials and hand out a session token plus a refresh token.
async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = state
        .user_service
        .authenticate(&req.email, &req.password)
        .await?;

    let token = state
        .token_service
        .issue_session_token(user.id, req.expires_in_seconds)?;
    let refresh_token = state.token_service.issue_refresh_token(user.id).await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        id: user.id,
        email: user.email,
        is_chirpy_red: user.is_privileged,
        token,
        refresh_token,
    }))
}

/// Trade a refresh token (as Bearer) for a new session token.
async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>> {
    let refresh_token = bearer_token(&headers)?;
    let user_id = state
        .token_service
        .redeem_refresh_token(refresh_token)
        .await?;

    let token = state.token_service.issue_session_token(user_id, 0)?;
    Ok(Json(TokenResponse { token }))
}

/// Revoke a refresh token (as Bearer).
async fn revoke(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Result<StatusCode> {
    let refresh_token = bearer_token(&headers)?;
    state
        .token_service
        .revoke_refresh_token(refresh_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
