//! Harness configuration.
//!
//! Loaded from a TOML file, then overridden by environment variables, then
//! by command-line flags (applied by the caller).
//!
//! ```toml
//! root = "src"
//! update = "new"
//!
//! [[backends]]
//! kind = "builtin"
//! name = "tree-sitter"
//!
//! [[backends]]
//! kind = "external"
//! name = "babel"
//! program = "./tools/parse-babel"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use treeshot_backends::{BackendRef, ExternalBackend};

/// Focus selector override.
pub const ONLY_ENV: &str = "TREESHOT_ONLY";
/// Update mode override.
pub const UPDATE_ENV: &str = "TREESHOT_UPDATE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid update mode `{0}` (expected new, all or none)")]
    InvalidUpdateMode(String),

    #[error("unknown backend `{0}`")]
    UnknownBackend(String),

    #[error("no backends configured")]
    NoBackends,
}

/// What the snapshot store may write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Create missing snapshots, compare existing ones.
    #[default]
    New,
    /// Also rewrite snapshots that no longer match.
    All,
    /// Never write; a missing snapshot fails.
    None,
}

impl FromStr for UpdateMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "new" | "0" | "false" => Ok(Self::New),
            "all" | "1" | "true" => Ok(Self::All),
            "none" | "ci" => Ok(Self::None),
            other => Err(ConfigError::InvalidUpdateMode(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// A backend compiled into treeshot.
    Builtin { name: String },
    /// A parser run as a child process.
    External {
        name: String,
        program: String,
        #[serde(default)]
        args: Vec<String>,
        /// Snapshot file label, derived from `name` when absent.
        label: Option<String>,
    },
}

impl BackendConfig {
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::Builtin { name: name.into() }
    }

    pub fn build(&self) -> Result<BackendRef, ConfigError> {
        match self {
            Self::Builtin { name } => treeshot_backends::from_name(name)
                .ok_or_else(|| ConfigError::UnknownBackend(name.clone())),
            Self::External {
                name,
                program,
                args,
                label,
            } => {
                let mut backend = ExternalBackend::new(name.as_str(), program.as_str(), args.clone());
                if let Some(label) = label {
                    backend = backend.with_label(label.as_str());
                }
                Ok(Arc::new(backend))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Directory scanned for fixtures.
    pub root: PathBuf,
    /// Name of the directories holding fixtures.
    pub marker: String,
    /// Name of the per-fixture snapshot directory.
    pub snapshot_dir: String,
    /// Fixture file extensions.
    pub extensions: Vec<String>,
    /// Run only the fixture at this `/`-joined path.
    pub only: Option<String>,
    pub update: UpdateMode,
    pub backends: Vec<BackendConfig>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            marker: "fixtures".to_owned(),
            snapshot_dir: "snapshots".to_owned(),
            extensions: vec!["ts".to_owned(), "tsx".to_owned()],
            only: None,
            update: UpdateMode::New,
            backends: vec![BackendConfig::builtin("tree-sitter")],
        }
    }
}

impl HarnessConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Load a config file. A missing file is not an error.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::from_toml(&content, base).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Some(config))
    }

    /// Parse TOML, resolving relative paths against `base`.
    pub fn from_toml(content: &str, base: &Path) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        config.root = base.join(&config.root);
        for backend in &mut config.backends {
            if let BackendConfig::External { program, .. } = backend
                && is_relative_path(program)
            {
                *program = base.join(&*program).to_string_lossy().into_owned();
            }
        }
        Ok(config)
    }

    /// Apply `TREESHOT_ONLY` and `TREESHOT_UPDATE` from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(only) = lookup(ONLY_ENV) {
            self.only = Some(only);
        }
        if let Some(update) = lookup(UPDATE_ENV) {
            self.update = update.parse()?;
        }
        Ok(())
    }

    /// The focus selector, if one is set and non-empty.
    pub fn focus(&self) -> Option<&str> {
        self.only.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn build_backends(&self) -> Result<Vec<BackendRef>, ConfigError> {
        if self.backends.is_empty() {
            return Err(ConfigError::NoBackends);
        }
        self.backends.iter().map(BackendConfig::build).collect()
    }
}

/// A relative path with at least one separator; bare names go through `PATH`.
fn is_relative_path(program: &str) -> bool {
    let path = Path::new(program);
    path.is_relative() && path.components().count() > 1
}
