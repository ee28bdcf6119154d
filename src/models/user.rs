// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage.

use serde::{Deserialize, Serialize};

/// User account stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Collection id (also the document key)
    pub id: u64,
    /// Email address, unique at creation time
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Set by the billing webhook ("Chirpy Red")
    #[serde(default)]
    pub is_privileged: bool,
}
