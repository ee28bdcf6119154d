// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chirp model for storage.

use serde::{Deserialize, Serialize};

/// A short post stored in the `chirps` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chirp {
    /// Collection id (also the document key)
    pub id: u64,
    /// Sanitized body, at most 140 characters
    pub body: String,
    /// Id of the user who posted it
    pub author_id: u64,
    /// Tombstone flag; deleted chirps keep their id slot
    #[serde(default)]
    pub deleted: bool,
}
