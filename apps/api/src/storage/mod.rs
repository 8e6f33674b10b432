//! Local JSON store for the current resume and builder preferences.
//!
//! Two files under the data directory:
//! - `resume.json`          — the working resume
//! - `builder-config.json`  — visual preferences
//!
//! Reads are forgiving: anything missing, unparseable, or invalid falls back to defaults.
//! Each write goes to its own temp file in the data directory and is renamed into place,
//! so concurrent writers never share a temp path.

pub mod handlers;

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::builder_config::BuilderConfig;
use crate::models::resume::ResumeDocument;
use crate::refine::validation::{normalize_resume, resume_from_value};

const RESUME_FILE: &str = "resume.json";
const CONFIG_FILE: &str = "builder-config.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

/// Writes `body` to a fresh temp file in `dir`, then renames it over `path`.
fn persist_atomically(dir: &Path, path: &Path, body: &[u8]) -> Result<(), StoreError> {
    std::fs::create_dir_all(dir).map_err(io_error(dir))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_error(dir))?;
    tmp.write_all(body).map_err(io_error(tmp.path()))?;
    tmp.persist(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ResumeStore {
    dir: PathBuf,
}

impl ResumeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Reads and parses a stored JSON file. Missing or unparseable files yield `None`.
    async fn read_json(&self, file: &str) -> Option<Value> {
        let path = self.path(file);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Could not read {}: {e}", path.display());
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring unparseable {}: {e}", path.display());
                None
            }
        }
    }

    async fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(value)?;
        let dir = self.dir.clone();
        let path = self.path(file);

        tokio::task::spawn_blocking(move || {
            persist_atomically(&dir, &path, &body)?;
            debug!("Wrote {}", path.display());
            Ok::<_, StoreError>(())
        })
        .await?
    }

    /// Loads the stored resume, repairing what `normalize_resume` can. Falls back to the
    /// sample resume when nothing valid is stored.
    pub async fn load_resume(&self) -> ResumeDocument {
        let Some(stored) = self.read_json(RESUME_FILE).await else {
            return ResumeDocument::sample();
        };

        match resume_from_value(normalize_resume(stored)) {
            Ok(resume) => resume,
            Err(reason) => {
                warn!("Stored resume is invalid ({reason}); using sample resume");
                ResumeDocument::sample()
            }
        }
    }

    pub async fn save_resume(&self, resume: &ResumeDocument) -> Result<(), StoreError> {
        self.write_json(RESUME_FILE, resume).await
    }

    /// Loads builder preferences, merging any stored fields over the defaults.
    pub async fn load_config(&self) -> BuilderConfig {
        self.read_json(CONFIG_FILE)
            .await
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }

    pub async fn save_config(&self, config: &BuilderConfig) -> Result<(), StoreError> {
        self.write_json(CONFIG_FILE, config).await
    }

    /// Deletes both stored files. Files that are already gone are fine.
    pub async fn reset(&self) -> Result<(), StoreError> {
        for file in [RESUME_FILE, CONFIG_FILE] {
            let path = self.path(file);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(source) => return Err(StoreError::Io { path, source }),
            }
        }
        info!("Store reset at {}", self.dir.display());
        Ok(())
    }
}
