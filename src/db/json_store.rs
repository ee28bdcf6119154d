// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-file JSON record store.
//!
//! The whole [`Document`] lives in one JSON file. Access goes through one
//! process-wide readers-writer lock:
//! - [`JsonStore::load`] holds the shared lock while reading.
//! - [`JsonStore::save`] holds the exclusive lock while encoding and writing.
//! - [`JsonStore::transaction`] holds the exclusive lock across
//!   load, mutate and save, so concurrent mutations cannot lose updates.
//!
//! Writes go to a sibling temp file which is then renamed over the target,
//! so a reader never sees a half-written document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::models::Document;

/// Store-layer failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode store document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode store document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// JSON file store. Cheap to clone; clones share the lock.
#[derive(Clone)]
pub struct JsonStore {
    path: Arc<PathBuf>,
    lock: Arc<RwLock<()>>,
}

impl JsonStore {
    /// Create a handle without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// Create a handle and make sure the document exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);
        store.ensure_initialized().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty document if none exists yet.
    ///
    /// Any read failure other than "not found" is returned as-is.
    pub async fn ensure_initialized(&self) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;

        match fs::read(self.path.as_path()).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "Creating empty store document");
                self.write_document(&Document::default()).await
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read and decode the current document.
    pub async fn load(&self) -> Result<Document, StoreError> {
        let _guard = self.lock.read().await;
        self.read_document().await
    }

    /// Encode and atomically replace the persisted document.
    pub async fn save(&self, document: &Document) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;
        self.write_document(document).await
    }

    /// Run `f` against the current document under the exclusive lock.
    ///
    /// The document is saved only when `f` returns `Ok`; on `Err` the file is
    /// left untouched and the error is returned.
    pub async fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Document) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.lock.write().await;

        let mut document = self.read_document().await?;
        let value = f(&mut document)?;
        self.write_document(&document).await?;

        Ok(value)
    }

    async fn read_document(&self) -> Result<Document, StoreError> {
        let data = fs::read(self.path.as_path()).await?;
        serde_json::from_slice(&data).map_err(StoreError::Decode)
    }

    async fn write_document(&self, document: &Document) -> Result<(), StoreError> {
        let data = serde_json::to_vec(document).map_err(StoreError::Encode)?;
        let temp_path = self.temp_path();

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp_path).await?;
        file.write_all(&data).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, self.path.as_path()).await?;

        tracing::debug!(
            path = %self.path.display(),
            bytes = data.len(),
            "Store document written"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "database.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
