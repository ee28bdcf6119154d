// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Refresh token model for storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Long-lived opaque credential stored in the `refreshTokens` collection.
///
/// One row is appended per login; a user may hold many live tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshToken {
    pub user_id: u64,
    /// Hex-encoded random bytes
    pub token_string: String,
    /// Last day (UTC) before which the token is accepted, serialized as `YYYY-MM-DD`
    pub expiration: NaiveDate,
    #[serde(default)]
    pub revoked: bool,
}

impl RefreshToken {
    /// Whether the token is past its expiration date at `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        today >= self.expiration
    }
}
