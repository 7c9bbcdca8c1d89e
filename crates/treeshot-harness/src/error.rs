use std::path::PathBuf;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Errors that stop a run before any fixture executes.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot open fixture root {path}: {source}")]
    Root {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid fixture pattern `{pattern}`: {reason}")]
    Pattern { pattern: String, reason: String },
}

/// Errors that fail a single fixture before its assertions run.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Source {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
