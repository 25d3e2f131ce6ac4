//! File-backed signup collection.
//!
//! The whole collection lives in one pretty-printed JSON array. Every write
//! rewrites the entire file. There is no locking: two concurrent
//! read-modify-write cycles can lose an update.
//!
//! Elements are kept as raw JSON so records written by older versions, or
//! carrying fields this crate does not know about, survive every rewrite.

use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

pub const SIGNUPS_FILE: &str = "signups.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode signups: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct SignupStore {
    path: PathBuf,
}

impl SignupStore {
    /// Store backed by `<data_dir>/signups.json`, creating `data_dir` if needed.
    /// The file itself is created on the first save.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)
            .await
            .map_err(|source| StoreError::CreateDir {
                path: data_dir.to_path_buf(),
                source,
            })?;
        Ok(Self::at(data_dir.join(SIGNUPS_FILE)))
    }

    /// Store backed by an explicit file path. Nothing is touched on disk.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection, element by element as stored.
    ///
    /// A missing, empty, unreadable or unparseable file reads as an empty
    /// collection, as does a document that is not an array.
    pub async fn load(&self) -> Vec<Value> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No signup store at {} yet", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        let document: Value = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => {
                warn!("Corrupt signup store {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match document {
            Value::Array(records) => records,
            _ => {
                warn!(
                    "Signup store {} is not an array, treating as empty",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Replace the collection on disk with `records`.
    pub async fn save(&self, records: &[Value]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        debug!("Wrote {} signups to {}", records.len(), self.path.display());
        Ok(())
    }
}
