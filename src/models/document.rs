// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The single persisted aggregate holding every collection.
//!
//! Collections are keyed by integer id. `serde_json` writes the keys as
//! decimal strings, so the file reads as `{"chirps": {"1": {...}}, ...}`.
//! `BTreeMap` keeps the key order stable, which makes encoding deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Chirp, RefreshToken, User};

/// Per-collection id allocator state.
///
/// A zero counter means "not yet recorded" (documents written before the
/// counters existed); allocation then falls back to the highest key plus one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextIds {
    #[serde(default)]
    pub chirps: u64,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub refresh_tokens: u64,
}

/// Everything the store persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub chirps: BTreeMap<u64, Chirp>,
    #[serde(default)]
    pub users: BTreeMap<u64, User>,
    #[serde(default)]
    pub refresh_tokens: BTreeMap<u64, RefreshToken>,
    #[serde(default)]
    pub next_ids: NextIds,
}

impl Document {
    /// Reserve the next chirp id.
    pub fn allocate_chirp_id(&mut self) -> u64 {
        allocate(&mut self.next_ids.chirps, &self.chirps)
    }

    /// Reserve the next user id.
    pub fn allocate_user_id(&mut self) -> u64 {
        allocate(&mut self.next_ids.users, &self.users)
    }

    /// Reserve the next refresh token row id.
    pub fn allocate_refresh_token_id(&mut self) -> u64 {
        allocate(&mut self.next_ids.refresh_tokens, &self.refresh_tokens)
    }

    /// Find a user by exact email match.
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }
}

/// Ids are never reused: the counter only moves forward and never drops
/// below an existing key.
fn allocate<T>(counter: &mut u64, records: &BTreeMap<u64, T>) -> u64 {
    let floor = records.keys().next_back().map_or(1, |last| last + 1);
    let id = (*counter).max(floor);
    *counter = id + 1;
    id
}
