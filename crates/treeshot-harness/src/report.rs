//! Run results and their text summary.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

use similar::{ChangeTag, TextDiff};

use crate::fixture::AssertionKind;
use crate::store::Comparison;

/// Outcome of one assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Compared(Comparison),
    /// The rendered value violated the node contract.
    Broken(String),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        match self {
            Outcome::Compared(comparison) => comparison.is_pass(),
            Outcome::Broken(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    pub backend: String,
    pub kind: AssertionKind,
    pub path: PathBuf,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureStatus {
    Ran(Vec<Assertion>),
    /// Not selected by the focus filter.
    Skipped,
    /// Setup failed before any assertion ran.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureResult {
    pub id: String,
    pub status: FixtureStatus,
}

impl FixtureResult {
    pub fn assertions(&self) -> &[Assertion] {
        match &self.status {
            FixtureStatus::Ran(assertions) => assertions,
            FixtureStatus::Skipped | FixtureStatus::Failed(_) => &[],
        }
    }

    pub fn is_failure(&self) -> bool {
        match &self.status {
            FixtureStatus::Ran(assertions) => assertions.iter().any(|a| !a.outcome.is_pass()),
            FixtureStatus::Skipped => false,
            FixtureStatus::Failed(_) => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub passed: usize,
    pub failed: usize,
    pub created: usize,
    pub updated: usize,
    /// Fixtures skipped by the focus filter.
    pub skipped: usize,
    /// Fixtures whose setup failed.
    pub errored: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub fixtures: Vec<FixtureResult>,
}

impl Report {
    pub fn counts(&self) -> Counts {
        let mut counts = Counts::default();
        for fixture in &self.fixtures {
            match &fixture.status {
                FixtureStatus::Skipped => counts.skipped += 1,
                FixtureStatus::Failed(_) => counts.errored += 1,
                FixtureStatus::Ran(assertions) => {
                    for assertion in assertions {
                        match &assertion.outcome {
                            Outcome::Compared(Comparison::Created) => counts.created += 1,
                            Outcome::Compared(Comparison::Updated { .. }) => counts.updated += 1,
                            _ => {}
                        }
                        if assertion.outcome.is_pass() {
                            counts.passed += 1;
                        } else {
                            counts.failed += 1;
                        }
                    }
                }
            }
        }
        counts
    }

    pub fn is_success(&self) -> bool {
        !self.fixtures.iter().any(FixtureResult::is_failure)
    }

    /// One line per failing assertion or fixture, with diffs for mismatches.
    pub fn failures(&self) -> String {
        let mut out = String::new();
        for fixture in self.fixtures.iter().filter(|f| f.is_failure()) {
            if let FixtureStatus::Failed(reason) = &fixture.status {
                let _ = writeln!(out, "FAIL {}: {reason}", fixture.id);
                continue;
            }
            for assertion in fixture.assertions().iter().filter(|a| !a.outcome.is_pass()) {
                let _ = write!(out, "FAIL {} [{} - {}]", fixture.id, assertion.backend, assertion.kind);
                match &assertion.outcome {
                    Outcome::Broken(reason) => {
                        let _ = writeln!(out, ": {reason}");
                    }
                    Outcome::Compared(Comparison::Missing { .. }) => {
                        let _ = writeln!(out, ": snapshot missing at {}", assertion.path.display());
                    }
                    Outcome::Compared(Comparison::Mismatch { expected, actual }) => {
                        let _ = writeln!(out, ": snapshot mismatch at {}", assertion.path.display());
                        out.push_str(&diff(expected, actual));
                    }
                    Outcome::Compared(_) => {
                        let _ = writeln!(out);
                    }
                }
            }
        }
        out
    }

    pub fn summary(&self) -> String {
        let counts = self.counts();
        let mut summary = format!("{} passed, {} failed", counts.passed, counts.failed);
        if counts.errored > 0 {
            let _ = write!(summary, ", {} fixtures errored", counts.errored);
        }
        if counts.skipped > 0 {
            let _ = write!(summary, ", {} fixtures skipped", counts.skipped);
        }
        if counts.created > 0 {
            let _ = write!(summary, " ({} snapshots created)", counts.created);
        }
        if counts.updated > 0 {
            let _ = write!(summary, " ({} snapshots updated)", counts.updated);
        }
        summary
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.failures())?;
        write!(f, "{}", self.summary())
    }
}

/// Line diff of stored (`-`) against rendered (`+`) text.
pub fn diff(expected: &str, actual: &str) -> String {
    let mut out = String::new();
    for change in TextDiff::from_lines(expected, actual).iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => ' ',
        };
        out.push(sign);
        out.push_str(change.value());
        if change.missing_newline() {
            out.push('\n');
        }
    }
    out
}
