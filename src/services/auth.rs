// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session and refresh token issuance and validation.
//!
//! Session tokens are HS256 JWTs carrying the user id as `sub` and a fixed
//! issuer. Refresh tokens are opaque random hex strings persisted in the
//! store with a day-granularity expiration.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{Config, TOKEN_ISSUER};
use crate::db::JsonStore;
use crate::error::{AppError, Result};
use crate::models::RefreshToken;
use crate::time_utils::{refresh_expiration, unix_timestamp};

const REFRESH_TOKEN_BYTES: usize = 32;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Issuer, always [`TOKEN_ISSUER`]
    pub iss: String,
    /// Subject (user id)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

/// Issues and validates credentials.
#[derive(Clone)]
pub struct TokenService {
    store: JsonStore,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    session_ttl_secs: u64,
    refresh_ttl_days: i64,
    rng: Arc<SystemRandom>,
}

impl TokenService {
    pub fn new(config: &Config, store: JsonStore) -> Self {
        Self {
            store,
            encoding_key: Arc::new(EncodingKey::from_secret(&config.jwt_signing_key)),
            decoding_key: Arc::new(DecodingKey::from_secret(&config.jwt_signing_key)),
            session_ttl_secs: config.session_ttl_secs,
            refresh_ttl_days: config.refresh_ttl_days,
            rng: Arc::new(SystemRandom::new()),
        }
    }

    /// Effective session lifetime for a requested one.
    ///
    /// Zero or anything above the configured maximum yields the maximum.
    pub fn session_ttl(&self, requested_secs: u64) -> u64 {
        if requested_secs == 0 || requested_secs > self.session_ttl_secs {
            self.session_ttl_secs
        } else {
            requested_secs
        }
    }

    /// Create a session token for `user_id`.
    pub fn issue_session_token(&self, user_id: u64, ttl_secs: u64) -> Result<String> {
        self.issue_session_token_at(user_id, ttl_secs, Utc::now())
    }

    /// Create a session token as if issued at `issued_at`.
    pub fn issue_session_token_at(
        &self,
        user_id: u64,
        ttl_secs: u64,
        issued_at: DateTime<Utc>,
    ) -> Result<String> {
        let ttl = Duration::seconds(self.session_ttl(ttl_secs) as i64);

        let claims = Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: unix_timestamp(issued_at),
            exp: unix_timestamp(issued_at + ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))
    }

    /// Validate a session token and return the user id it was issued to.
    pub fn verify_session_token(&self, token: &str) -> Result<u64> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "Token has expired",
                    ErrorKind::InvalidSignature => "Invalid token signature",
                    ErrorKind::InvalidIssuer => "Invalid token issuer",
                    _ => "Invalid token",
                };
                tracing::debug!(error = %e, "Session token rejected");
                AppError::Unauthorized(reason.to_string())
            })?;

        token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
    }

    /// Create and persist a new refresh token for `user_id`.
    pub async fn issue_refresh_token(&self, user_id: u64) -> Result<String> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Random generator failed")))?;
        let token_string = hex::encode(bytes);

        let token = RefreshToken {
            user_id,
            token_string: token_string.clone(),
            expiration: refresh_expiration(Utc::now(), self.refresh_ttl_days),
            revoked: false,
        };

        let row_id = self
            .store
            .transaction(|doc| {
                let id = doc.allocate_refresh_token_id();
                doc.refresh_tokens.insert(id, token);
                Ok::<_, AppError>(id)
            })
            .await?;

        tracing::info!(user_id, row_id, "Refresh token issued");
        Ok(token_string)
    }

    /// Exchange a refresh token for the id of the user it belongs to.
    pub async fn redeem_refresh_token(&self, token: &str) -> Result<u64> {
        let doc = self.store.load().await?;

        let stored = doc
            .refresh_tokens
            .values()
            .find(|t| !t.revoked && t.token_string == token)
            .ok_or_else(|| AppError::Unauthorized("Refresh token is not valid".to_string()))?;

        if stored.is_expired(Utc::now().date_naive()) {
            tracing::info!(user_id = stored.user_id, "Expired refresh token presented");
            return Err(AppError::Unauthorized(
                "Refresh token is expired".to_string(),
            ));
        }

        Ok(stored.user_id)
    }

    /// Revoke a refresh token. Unknown or already revoked tokens are NotFound.
    pub async fn revoke_refresh_token(&self, token: &str) -> Result<()> {
        let user_id = self
            .store
            .transaction(|doc| {
                let stored = doc
                    .refresh_tokens
                    .values_mut()
                    .find(|t| !t.revoked && t.token_string == token)
                    .ok_or_else(|| AppError::NotFound("Refresh token not found".to_string()))?;
                stored.revoked = true;
                Ok::<_, AppError>(stored.user_id)
            })
            .await?;

        tracing::info!(user_id, "Refresh token revoked");
        Ok(())
    }
}
