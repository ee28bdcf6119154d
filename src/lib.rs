// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Chirpy: a small social-posting API.
//!
//! Users, chirps and refresh tokens are persisted in a single JSON document
//! guarded by a readers-writer lock; the HTTP layer is a thin axum router
//! on top of the services.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::JsonStore;
use services::{ChirpService, TokenService, UserService};
use std::sync::atomic::AtomicU64;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: JsonStore,
    pub chirp_service: ChirpService,
    pub user_service: UserService,
    pub token_service: TokenService,
    /// Requests served by the static file server since start (or last reset)
    pub fileserver_hits: AtomicU64,
}

impl AppState {
    /// Wire the services onto an opened store.
    pub fn new(config: Config, store: JsonStore) -> Self {
        let token_service = TokenService::new(&config, store.clone());
        let user_service = UserService::new(store.clone(), token_service.clone());
        let chirp_service = ChirpService::new(store.clone());

        Self {
            config,
            store,
            chirp_service,
            user_service,
            token_service,
            fileserver_hits: AtomicU64::new(0),
        }
    }
}
