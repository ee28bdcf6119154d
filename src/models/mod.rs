// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod chirp;
pub mod document;
pub mod refresh_token;
pub mod user;

pub use chirp::Chirp;
pub use document::{Document, NextIds};
pub use refresh_token::RefreshToken;
pub use user::User;
