//! Config resolution shared by `run` and `list`.

use std::path::{Path, PathBuf};

use treeshot_harness::{BackendConfig, ConfigError, HarnessConfig, UpdateMode};

/// Config file looked up in the fixture root when `--config` is absent.
pub const CONFIG_FILE: &str = "treeshot.toml";

/// Flags layered over the config file and environment.
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub root: Option<&'a Path>,
    pub config: Option<&'a Path>,
    pub only: Option<&'a str>,
    pub update: Option<UpdateMode>,
    pub backends: &'a [String],
}

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("config file not found: {}", .0.display())]
    MissingConfig(PathBuf),
}

/// File, then environment, then flags.
pub fn resolve_config(
    overrides: &Overrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<HarnessConfig, SetupError> {
    let mut config = match overrides.config {
        Some(path) => {
            let mut config = HarnessConfig::load_from_path(path)?
                .ok_or_else(|| SetupError::MissingConfig(path.to_path_buf()))?;
            if let Some(root) = overrides.root {
                config.root = root.to_path_buf();
            }
            config
        }
        None => {
            let root = overrides.root.unwrap_or_else(|| Path::new("."));
            HarnessConfig::load_from_path(root.join(CONFIG_FILE))?
                .unwrap_or_else(|| HarnessConfig::with_root(root))
        }
    };

    config.apply_overrides(env)?;

    if let Some(only) = overrides.only {
        config.only = Some(only.to_owned());
    }
    if let Some(update) = overrides.update {
        config.update = update;
    }
    if !overrides.backends.is_empty() {
        config.backends = overrides
            .backends
            .iter()
            .map(|name| BackendConfig::builtin(name.as_str()))
            .collect();
    }

    tracing::debug!(root = %config.root.display(), update = ?config.update, "resolved config");
    Ok(config)
}
