// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Secrets are read once at startup and handed to the services that need
//! them; nothing reads the environment after that.

use std::env;
use std::path::PathBuf;

/// Issuer claim written into every session token.
pub const TOKEN_ISSUER: &str = "chirpy";

const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;
const DEFAULT_REFRESH_TTL_DAYS: i64 = 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Server port
    pub port: u16,
    /// Path of the JSON store document
    pub db_path: PathBuf,
    /// Directory served under `/app/`
    pub fileserver_root: PathBuf,
    /// Default and maximum session token lifetime
    pub session_ttl_secs: u64,
    /// Refresh token lifetime in days
    pub refresh_ttl_days: i64,

    // --- Secrets ---
    /// HMAC key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Shared key presented by the billing webhook
    pub polka_key: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: PathBuf::from("database.json"),
            fileserver_root: PathBuf::from("."),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            refresh_ttl_days: DEFAULT_REFRESH_TTL_DAYS,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            polka_key: "test_polka_key".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            db_path: env::var("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("database.json")),
            fileserver_root: env::var("FILESERVER_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            session_ttl_secs: parse_var("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            refresh_ttl_days: parse_var("REFRESH_TTL_DAYS", DEFAULT_REFRESH_TTL_DAYS)?,

            jwt_signing_key: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET"))?
                .into_bytes(),
            polka_key: env::var("POLKA_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("POLKA_KEY"))?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
