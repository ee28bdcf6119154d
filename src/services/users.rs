// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User lifecycle: registration, credential updates, login, upgrades.

use crate::db::JsonStore;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::auth::TokenService;

/// bcrypt work factor for stored password hashes.
pub const PASSWORD_HASH_COST: u32 = 7;

#[derive(Clone)]
pub struct UserService {
    store: JsonStore,
    tokens: TokenService,
}

impl UserService {
    pub fn new(store: JsonStore, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    /// Register a new user. Emails must be unique.
    pub async fn create(&self, email: &str, password: &str) -> Result<User> {
        let password_hash = hash_password(email, password).await?;

        let user = self
            .store
            .transaction(|doc| {
                if doc.user_by_email(email).is_some() {
                    return Err(AppError::Conflict("User already exists".to_string()));
                }

                let user = User {
                    id: doc.allocate_user_id(),
                    email: email.to_string(),
                    password_hash,
                    is_privileged: false,
                };
                doc.users.insert(user.id, user.clone());
                Ok(user)
            })
            .await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Replace the email and password of the user named by a session token.
    ///
    /// The token subject is the only source of the target id.
    pub async fn update_by_token(
        &self,
        session_token: &str,
        email: &str,
        password: &str,
    ) -> Result<User> {
        let user_id = self.tokens.verify_session_token(session_token)?;
        self.update(user_id, email, password).await
    }

    /// Replace the email and password of an already authenticated user.
    pub async fn update(&self, user_id: u64, email: &str, password: &str) -> Result<User> {
        let password_hash = hash_password(email, password).await?;

        let user = self
            .store
            .transaction(|doc| {
                let user = doc
                    .users
                    .get_mut(&user_id)
                    .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

                user.email = email.to_string();
                user.password_hash = password_hash;
                Ok::<_, AppError>(user.clone())
            })
            .await?;

        tracing::info!(user_id, "User credentials updated");
        Ok(user)
    }

    /// Check an email/password pair and return the matching user.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let doc = self.store.load().await?;

        let invalid = || AppError::Unauthorized("Incorrect email or password".to_string());

        let user = doc.user_by_email(email).ok_or_else(invalid)?;

        let matches = verify_password(password, &user.password_hash).await?;

        if !matches {
            tracing::info!(user_id = user.id, "Login rejected: wrong password");
            return Err(invalid());
        }

        Ok(user.clone())
    }

    /// Mark a user as privileged ("Chirpy Red").
    pub async fn promote_to_privileged(&self, user_id: u64) -> Result<()> {
        self.store
            .transaction(|doc| {
                let user = doc
                    .users
                    .get_mut(&user_id)
                    .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
                user.is_privileged = true;
                Ok::<_, AppError>(())
            })
            .await?;

        tracing::info!(user_id, "User upgraded to Chirpy Red");
        Ok(())
    }
}

/// Reject empty credentials, then hash the password on the blocking pool.
async fn hash_password(email: &str, password: &str) -> Result<String> {
    if email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, PASSWORD_HASH_COST))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Could not hash password: {}", e)))
}

async fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verification failed: {}", e)))
}
