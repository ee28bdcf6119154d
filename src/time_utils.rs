// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Expiration date (UTC, day granularity) for a refresh token issued at `now`.
pub fn refresh_expiration(now: DateTime<Utc>, ttl_days: i64) -> NaiveDate {
    (now + Duration::days(ttl_days)).date_naive()
}

/// Seconds since the Unix epoch, as used by JWT `iat`/`exp` claims.
pub fn unix_timestamp(date: DateTime<Utc>) -> usize {
    date.timestamp().max(0) as usize
}
