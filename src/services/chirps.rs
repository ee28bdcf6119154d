// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chirp lifecycle: create, list, get, delete.

use crate::db::JsonStore;
use crate::error::{AppError, Result};
use crate::models::Chirp;
use crate::services::sanitizer::sanitize;

/// Maximum chirp length in characters.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Ordering for chirp listings (by id).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `"desc"` sorts descending; anything else, including nothing, ascending.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Check the length limit and mask denylisted words.
pub fn validate_chirp(body: &str) -> Result<String> {
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(AppError::Validation("Chirp is too long".to_string()));
    }
    Ok(sanitize(body))
}

#[derive(Clone)]
pub struct ChirpService {
    store: JsonStore,
}

impl ChirpService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Validate, sanitize and persist a new chirp.
    pub async fn create(&self, body: &str, author_id: u64) -> Result<Chirp> {
        let body = validate_chirp(body)?;

        let chirp = self
            .store
            .transaction(|doc| {
                let chirp = Chirp {
                    id: doc.allocate_chirp_id(),
                    body,
                    author_id,
                    deleted: false,
                };
                doc.chirps.insert(chirp.id, chirp.clone());
                Ok::<_, AppError>(chirp)
            })
            .await?;

        tracing::info!(chirp_id = chirp.id, author_id, "Chirp created");
        Ok(chirp)
    }

    /// Live chirps, optionally limited to one author, ordered by id.
    pub async fn list(&self, author_id: Option<u64>, sort: SortDirection) -> Result<Vec<Chirp>> {
        let doc = self.store.load().await?;

        let mut chirps: Vec<Chirp> = doc
            .chirps
            .into_values()
            .filter(|c| !c.deleted)
            .filter(|c| author_id.is_none_or(|id| c.author_id == id))
            .collect();

        match sort {
            SortDirection::Asc => chirps.sort_by_key(|c| c.id),
            SortDirection::Desc => chirps.sort_by(|a, b| b.id.cmp(&a.id)),
        }

        Ok(chirps)
    }

    pub async fn get(&self, id: u64) -> Result<Chirp> {
        let doc = self.store.load().await?;

        doc.chirps
            .get(&id)
            .filter(|c| !c.deleted)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Chirp {} not found", id)))
    }

    /// Tombstone a chirp. Only its author may delete it.
    pub async fn delete(&self, id: u64, requester_id: u64) -> Result<()> {
        self.store
            .transaction(|doc| {
                let chirp = doc
                    .chirps
                    .get_mut(&id)
                    .filter(|c| !c.deleted)
                    .ok_or_else(|| AppError::NotFound(format!("Chirp {} not found", id)))?;

                if chirp.author_id != requester_id {
                    return Err(AppError::Forbidden(
                        "User does not own chirp".to_string(),
                    ));
                }

                chirp.deleted = true;
                Ok(())
            })
            .await?;

        tracing::info!(chirp_id = id, author_id = requester_id, "Chirp deleted");
        Ok(())
    }
}
