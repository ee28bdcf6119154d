// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token authentication middleware and header helpers.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Authenticated user extracted from the session token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: u64,
}

/// Middleware that requires a valid session token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;
    let user_id = state.token_service.verify_session_token(token)?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}

/// Middleware that requires the billing provider's API key.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = api_key(request.headers())?;

    let key_matches: bool = key.as_bytes().ct_eq(state.config.polka_key.as_bytes()).into();
    if !key_matches {
        tracing::warn!("Security Alert: Webhook API key mismatch");
        return Err(AppError::Unauthorized("Invalid API key".to_string()));
    }

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    authorization_credential(headers, "Bearer ")
}

/// Extract the key from `Authorization: ApiKey <key>`.
pub fn api_key(headers: &HeaderMap) -> Result<&str, AppError> {
    authorization_credential(headers, "ApiKey ")
}

fn authorization_credential<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header".to_string()))?;

    let credential = value
        .strip_prefix(scheme)
        .map(str::trim)
        .ok_or_else(|| {
            AppError::Unauthorized(format!("Authorization header must use {}", scheme.trim()))
        })?;

    if credential.is_empty() {
        return Err(AppError::Unauthorized(
            "Authorization credential is empty".to_string(),
        ));
    }

    Ok(credential)
}
