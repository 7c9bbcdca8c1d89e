//! Typed parameters extracted from `ArgMatches`.

use std::path::PathBuf;

use clap::ArgMatches;
use treeshot_harness::UpdateMode;

use crate::commands::ast::AstArgs;
use crate::commands::list::ListArgs;
use crate::commands::run::RunArgs;

pub struct RunParams {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub only: Option<String>,
    pub update: bool,
    pub ci: bool,
    pub backends: Vec<String>,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            root: m.get_one::<PathBuf>("root").cloned(),
            config: m.get_one::<PathBuf>("config").cloned(),
            only: m.get_one::<String>("only").cloned(),
            update: m.get_flag("update"),
            ci: m.get_flag("ci"),
            backends: m
                .get_many::<String>("backend")
                .map(|names| names.cloned().collect())
                .unwrap_or_default(),
        }
    }

    /// `--update` and `--ci` are mutually exclusive; neither leaves the
    /// configured mode in place.
    fn update_mode(&self) -> Option<UpdateMode> {
        if self.update {
            Some(UpdateMode::All)
        } else if self.ci {
            Some(UpdateMode::None)
        } else {
            None
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        Self {
            update: p.update_mode(),
            root: p.root,
            config: p.config,
            only: p.only,
            backends: p.backends,
        }
    }
}

pub struct ListParams {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub only: Option<String>,
}

impl ListParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            root: m.get_one::<PathBuf>("root").cloned(),
            config: m.get_one::<PathBuf>("config").cloned(),
            only: m.get_one::<String>("only").cloned(),
        }
    }
}

impl From<ListParams> for ListArgs {
    fn from(p: ListParams) -> Self {
        Self {
            root: p.root,
            config: p.config,
            only: p.only,
        }
    }
}

pub struct AstParams {
    pub source_path: Option<PathBuf>,
    pub backend: String,
    pub tokens: bool,
    pub jsx: bool,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            backend: m
                .get_one::<String>("backend")
                .cloned()
                .unwrap_or_else(|| "tree-sitter".to_owned()),
            tokens: m.get_flag("tokens"),
            jsx: m.get_flag("jsx"),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            source_path: p.source_path.unwrap_or_default(),
            backend: p.backend,
            tokens: p.tokens,
            jsx: p.jsx,
        }
    }
}

pub struct BackendsParams;

impl BackendsParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}
