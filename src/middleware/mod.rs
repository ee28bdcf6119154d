// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (authentication, metrics).

pub mod auth;
pub mod metrics;

pub use auth::{require_api_key, require_auth, AuthUser};
pub use metrics::count_fileserver_hits;
