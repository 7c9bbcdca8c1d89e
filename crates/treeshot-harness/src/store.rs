//! Golden snapshot persistence.
//!
//! One text file per fixture, backend and assertion kind. Text is stored
//! verbatim: what the printer rendered is exactly what lands on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::UpdateMode;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create snapshot directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of comparing rendered text with the stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// No snapshot existed; it was written.
    Created,
    Matched,
    /// The snapshot differed and was rewritten.
    Updated { expected: String },
    Mismatch { expected: String, actual: String },
    /// No snapshot exists and writing is disabled.
    Missing { actual: String },
}

impl Comparison {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Created | Self::Matched | Self::Updated { .. })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotStore {
    mode: UpdateMode,
}

impl SnapshotStore {
    pub fn new(mode: UpdateMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// The stored text, or `None` when there is no snapshot.
    pub fn read(&self, path: &Path) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn write(&self, path: &Path, text: &str) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        std::fs::write(path, text).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn compare_or_create(&self, path: &Path, actual: &str) -> Result<Comparison, StoreError> {
        let Some(expected) = self.read(path)? else {
            if self.mode == UpdateMode::None {
                return Ok(Comparison::Missing {
                    actual: actual.to_owned(),
                });
            }
            self.write(path, actual)?;
            tracing::info!(path = %path.display(), "snapshot created");
            return Ok(Comparison::Created);
        };

        if expected == actual {
            return Ok(Comparison::Matched);
        }
        if self.mode == UpdateMode::All {
            self.write(path, actual)?;
            tracing::info!(path = %path.display(), "snapshot updated");
            return Ok(Comparison::Updated { expected });
        }
        Ok(Comparison::Mismatch {
            expected,
            actual: actual.to_owned(),
        })
    }
}

/// Create a directory and its parents. An existing directory is success,
/// including one created concurrently by another worker.
pub fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    match std::fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(source) => Err(StoreError::CreateDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}
