//! Running fixtures through backends and the snapshot store.

use treeshot_backends::BackendRef;
use treeshot_core::{Printer, TagSet, canonical_printer};

use crate::capture::capture;
use crate::config::HarnessConfig;
use crate::error::{FixtureError, Result};
use crate::fixture::{AssertionKind, Fixture, discover};
use crate::report::{Assertion, FixtureResult, FixtureStatus, Outcome, Report};
use crate::store::{SnapshotStore, ensure_dir};
use crate::tree::TestTree;

/// A configured run: backends, printer and store, built once and shared by
/// every fixture.
pub struct Harness {
    config: HarnessConfig,
    backends: Vec<BackendRef>,
    printer: Printer,
    store: SnapshotStore,
}

impl Harness {
    /// The printer recognizes the union of every backend's node and token types.
    pub fn new(config: HarnessConfig, backends: Vec<BackendRef>) -> Self {
        let mut tags = TagSet::new();
        for backend in &backends {
            tags.merge(&backend.tags());
        }
        let store = SnapshotStore::new(config.update);
        Self {
            printer: canonical_printer(tags),
            config,
            backends,
            store,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn backends(&self) -> &[BackendRef] {
        &self.backends
    }

    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    pub fn discover(&self) -> Result<Vec<Fixture>> {
        let labels: Vec<&str> = self.backends.iter().map(|b| b.label()).collect();
        discover(&self.config, &labels)
    }

    pub fn tree(&self, fixtures: &[Fixture]) -> TestTree {
        TestTree::build(fixtures, self.config.focus())
    }

    /// Discover, build the tree, and run every selected case.
    pub fn run(&self) -> Result<Report> {
        let fixtures = self.discover()?;
        let tree = self.tree(&fixtures);

        let results = tree
            .cases()
            .into_iter()
            .map(|index| {
                let fixture = &fixtures[index];
                if tree.is_selected(index) {
                    self.run_fixture(fixture)
                } else {
                    FixtureResult {
                        id: fixture.id(),
                        status: FixtureStatus::Skipped,
                    }
                }
            })
            .collect();

        Ok(Report { fixtures: results })
    }

    pub fn run_fixture(&self, fixture: &Fixture) -> FixtureResult {
        let id = fixture.id();
        tracing::debug!(fixture = %id, "running");
        let status = match self.assert_fixture(fixture) {
            Ok(assertions) => FixtureStatus::Ran(assertions),
            Err(error) => {
                tracing::error!(fixture = %id, %error, "fixture setup failed");
                FixtureStatus::Failed(error.to_string())
            }
        };
        FixtureResult { id, status }
    }

    fn assert_fixture(&self, fixture: &Fixture) -> std::result::Result<Vec<Assertion>, FixtureError> {
        let source = std::fs::read_to_string(&fixture.absolute).map_err(|source| FixtureError::Source {
            path: fixture.absolute.clone(),
            source,
        })?;
        ensure_dir(&fixture.snapshot_dir)?;

        let mut assertions = Vec::with_capacity(self.backends.len() * AssertionKind::ALL.len());
        for (backend, files) in self.backends.iter().zip(&fixture.snapshots) {
            let captured = capture(backend.as_ref(), &source, fixture.jsx);
            for kind in AssertionKind::ALL {
                let path = files.path(kind);
                let outcome = match self.printer.render(captured.value(kind)) {
                    Ok(text) => Outcome::Compared(self.store.compare_or_create(path, &text)?),
                    Err(error) => Outcome::Broken(error.to_string()),
                };
                assertions.push(Assertion {
                    backend: files.backend.clone(),
                    kind,
                    path: path.to_path_buf(),
                    outcome,
                });
            }
        }
        Ok(assertions)
    }
}
