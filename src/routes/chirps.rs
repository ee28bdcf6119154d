// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chirp routes.

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::middleware::auth::{require_auth, AuthUser};
use crate::models::Chirp;
use crate::services::chirps::validate_chirp;
use crate::services::SortDirection;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{delete, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Chirp routes. Creating and deleting require a session token; reads are public.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let auth = middleware::from_fn_with_state(state, require_auth);

    Router::new()
        .route(
            "/chirps",
            post(create_chirp)
                .route_layer(auth.clone())
                .get(list_chirps),
        )
        .route(
            "/chirps/{id}",
            delete(delete_chirp).route_layer(auth).get(get_chirp),
        )
        .route("/validate_chirp", post(check_chirp))
}

/// Chirp as returned by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChirpResponse {
    pub id: u64,
    pub body: String,
    pub author_id: u64,
}

impl From<Chirp> for ChirpResponse {
    fn from(chirp: Chirp) -> Self {
        Self {
            id: chirp.id,
            body: chirp.body,
            author_id: chirp.author_id,
        }
    }
}

#[derive(Deserialize)]
pub struct ChirpRequest {
    body: String,
}

#[derive(Deserialize)]
struct ChirpsQuery {
    /// Only chirps by this author
    author_id: Option<String>,
    /// `asc` (default) or `desc`
    sort: Option<String>,
}

fn parse_id(raw: &str, what: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid {}: {:?}", what, raw)))
}

async fn create_chirp(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(req): AppJson<ChirpRequest>,
) -> Result<(StatusCode, Json<ChirpResponse>)> {
    let chirp = state.chirp_service.create(&req.body, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(chirp.into())))
}

async fn list_chirps(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChirpsQuery>,
) -> Result<Json<Vec<ChirpResponse>>> {
    let author_id = params
        .author_id
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .map(|raw| parse_id(raw, "author_id"))
        .transpose()?;
    let sort = SortDirection::from_param(params.sort.as_deref());

    let chirps = state.chirp_service.list(author_id, sort).await?;
    Ok(Json(chirps.into_iter().map(ChirpResponse::from).collect()))
}

async fn get_chirp(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ChirpResponse>> {
    let id = parse_id(&id, "chirp id")?;
    let chirp = state.chirp_service.get(id).await?;
    Ok(Json(chirp.into()))
}

async fn delete_chirp(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id, "chirp id")?;
    state.chirp_service.delete(id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
struct CleanedChirp {
    cleaned_body: String,
}

/// Validate and sanitize a body without storing it.
async fn check_chirp(AppJson(req): AppJson<ChirpRequest>) -> Result<Json<CleanedChirp>> {
    let cleaned_body = validate_chirp(&req.body)?;
    Ok(Json(CleanedChirp { cleaned_body }))
}
