use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The persisted record: which directory holds the music library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub music_path: String,
}

/// Errors raised while reading or writing the record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config record: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to encode config record: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("config record is missing key `{0}`")]
    MissingKey(&'static str),
}

/// Shape accepted on read, so a missing key is told apart from bad JSON.
#[derive(Deserialize)]
struct RawRecord {
    music_path: Option<String>,
}

/// Reads and writes the single `config.json` record.
///
/// The presence of the file is meaningful on its own: no file means the
/// user has never chosen a directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True iff the record file is present.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Parse the record. Callers check [`exists`](Self::exists) first; an
    /// absent file is reported as a read error, not recovered from.
    pub fn load(&self) -> Result<ConfigRecord, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let raw: RawRecord = serde_json::from_str(&text).map_err(StoreError::Parse)?;
        let music_path = raw.music_path.ok_or(StoreError::MissingKey("music_path"))?;
        Ok(ConfigRecord { music_path })
    }

    /// Overwrite the record with `music_path`. Not atomic.
    pub fn save(&self, music_path: &str) -> Result<(), StoreError> {
        let record = ConfigRecord {
            music_path: music_path.to_string(),
        };
        let text = serde_json::to_string_pretty(&record).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        fs::write(&self.path, text).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), music_path, "saved config record");
        Ok(())
    }
}
