// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod auth;
pub mod chirps;
pub mod sanitizer;
pub mod users;

pub use auth::TokenService;
pub use chirps::{ChirpService, SortDirection};
pub use users::UserService;
