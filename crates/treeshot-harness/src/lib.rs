#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Golden snapshot harness for AST-producing parsers.
//!
//! A run discovers fixture files, groups them into a test tree, parses each
//! selected fixture with every configured backend, renders the AST, token
//! list and error through the canonical printer, and compares each
//! rendering with its stored snapshot.

pub mod capture;
pub mod config;
pub mod error;
pub mod fixture;
pub mod report;
pub mod runner;
pub mod store;
pub mod tree;

#[cfg(test)]
mod capture_tests;
#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod report_tests;

pub use capture::{Capture, ERROR_SENTINEL, NO_ERROR_SENTINEL};
pub use config::{BackendConfig, ConfigError, HarnessConfig, UpdateMode};
pub use error::{FixtureError, HarnessError, Result};
pub use fixture::{AssertionKind, Fixture, SnapshotSet};
pub use report::{Assertion, Counts, FixtureResult, FixtureStatus, Outcome, Report};
pub use runner::Harness;
pub use store::{Comparison, SnapshotStore, StoreError};
pub use tree::{Focus, TestNode, TestTree};
