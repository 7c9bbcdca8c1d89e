//! Fixture discovery.
//!
//! A fixture is one source file in its own directory under a marker
//! directory:
//!
//! ```text
//! <root>/declaration/ClassDeclaration/fixtures/abstract/fixture.ts
//!        ^^^^^^^^^^^ ^^^^^^^^^^^^^^^^          ^^^^^^^^
//!        groups                                name
//! ```
//!
//! Its snapshots live next to it in `<fixture dir>/snapshots/`, one file per
//! backend and assertion kind.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::HarnessConfig;
use crate::error::HarnessError;

/// The three compared facets of one parse attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssertionKind {
    Ast,
    Tokens,
    Error,
}

impl AssertionKind {
    pub const ALL: [AssertionKind; 3] = [Self::Ast, Self::Tokens, Self::Error];

    /// Suffix used in snapshot file names.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Ast => "AST",
            Self::Tokens => "Tokens",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Snapshot files of one backend slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSet {
    pub backend: String,
    pub ast: PathBuf,
    pub tokens: PathBuf,
    pub error: PathBuf,
}

impl SnapshotSet {
    pub fn path(&self, kind: AssertionKind) -> &Path {
        match kind {
            AssertionKind::Ast => &self.ast,
            AssertionKind::Tokens => &self.tokens,
            AssertionKind::Error => &self.error,
        }
    }
}

/// Snapshot file layout for a snapshot directory.
///
/// Slot `i` gets `{3i+1}-{label}-AST.shot`, `{3i+2}-{label}-Tokens.shot` and
/// `{3i+3}-{label}-Error.shot`; the cross-backend alignment file comes last.
pub fn snapshot_layout(dir: &Path, labels: &[&str]) -> (Vec<SnapshotSet>, PathBuf) {
    let sets = labels
        .iter()
        .enumerate()
        .map(|(slot, label)| {
            let file = |offset: usize, kind: AssertionKind| {
                dir.join(format!("{}-{label}-{}.shot", slot * 3 + offset, kind.suffix()))
            };
            SnapshotSet {
                backend: (*label).to_owned(),
                ast: file(1, AssertionKind::Ast),
                tokens: file(2, AssertionKind::Tokens),
                error: file(3, AssertionKind::Error),
            }
        })
        .collect();
    let alignment = dir.join(format!("{}-AST-Alignment.shot", labels.len() * 3 + 1));
    (sets, alignment)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub absolute: PathBuf,
    /// Leaf test name: the fixture's own directory.
    pub name: String,
    /// File extension without the dot.
    pub ext: String,
    /// Directories between the root and the fixture, marker directories removed.
    pub groups: Vec<String>,
    /// Parse with JSX enabled.
    pub jsx: bool,
    pub snapshot_dir: PathBuf,
    pub snapshots: Vec<SnapshotSet>,
    /// Reserved for a cross-backend structural diff; never written.
    pub alignment: PathBuf,
}

impl Fixture {
    /// Derive a fixture from a file path under `root`.
    ///
    /// Returns `None` when the file does not sit in a directory of its own
    /// below `root`.
    pub fn from_path(
        root: &Path,
        absolute: &Path,
        marker: &str,
        snapshot_dir: &str,
        labels: &[&str],
    ) -> Option<Self> {
        let relative = absolute.strip_prefix(root).ok()?;
        let dir = relative.parent()?;
        let ext = absolute.extension()?.to_str()?.to_owned();

        let mut groups: Vec<String> = dir
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .filter(|s| *s != marker)
            .map(str::to_owned)
            .collect();
        let name = groups.pop()?;

        let snapshot_dir = root.join(dir).join(snapshot_dir);
        let (snapshots, alignment) = snapshot_layout(&snapshot_dir, labels);

        Some(Self {
            absolute: absolute.to_path_buf(),
            jsx: ext.ends_with('x'),
            name,
            ext,
            groups,
            snapshot_dir,
            snapshots,
            alignment,
        })
    }

    /// Groups followed by the name.
    pub fn path(&self) -> Vec<&str> {
        self.groups
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
            .collect()
    }

    /// The `/`-joined path, as matched by the focus selector.
    pub fn id(&self) -> String {
        self.path().join("/")
    }
}

/// Find every fixture under the configured root, sorted by path.
pub fn discover(config: &HarnessConfig, labels: &[&str]) -> Result<Vec<Fixture>, HarnessError> {
    let root = config
        .root
        .canonicalize()
        .map_err(|source| HarnessError::Root {
            path: config.root.clone(),
            source,
        })?;
    let escaped = glob::Pattern::escape(&root.to_string_lossy());

    let mut files = Vec::new();
    for ext in &config.extensions {
        let pattern = format!(
            "{escaped}/**/{}/*/*.{}",
            glob::Pattern::escape(&config.marker),
            glob::Pattern::escape(ext)
        );
        let entries = glob::glob(&pattern).map_err(|e| HarnessError::Pattern {
            pattern: pattern.clone(),
            reason: e.msg.to_owned(),
        })?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!(path = %e.path().display(), "skipping unreadable path: {}", e.error()),
            }
        }
    }
    files.sort();
    files.dedup();

    let fixtures: Vec<Fixture> = files
        .iter()
        .filter_map(|path| {
            let fixture = Fixture::from_path(&root, path, &config.marker, &config.snapshot_dir, labels);
            if fixture.is_none() {
                tracing::debug!(path = %path.display(), "not a fixture");
            }
            fixture
        })
        .collect();

    tracing::info!(root = %root.display(), count = fixtures.len(), "discovered fixtures");
    Ok(fixtures)
}
