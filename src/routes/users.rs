// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account routes.

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::middleware::auth::{require_auth, AuthUser};
use crate::models::User;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// User routes. Updating requires a session token; registration is public.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let auth = middleware::from_fn_with_state(state, require_auth);

    Router::new().route("/users", put(update_user).route_layer(auth).post(create_user))
}

/// User as returned by the API (never includes the password hash).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: u64,
    pub email: String,
    pub is_chirpy_red: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_chirpy_red: user.is_privileged,
        }
    }
}

/// Email/password body shared by registration and updates.
#[derive(Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl CredentialsRequest {
    fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))
    }
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    req.check()?;
    let user = state.user_service.create(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Update the caller's own email and password. The target is the token subject.
async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> Result<Json<UserResponse>> {
    req.check()?;

    let user = state
        .user_service
        .update(auth.user_id, &req.email, &req.password)
        .await?;
    Ok(Json(user.into()))
}
