#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Parser backends under test.
//!
//! A backend is a black box: it takes source text and a fixed option set and
//! either returns a tree plus its token and comment lists, or fails. The
//! harness never inspects a backend beyond this trait.

use std::sync::Arc;

use treeshot_core::{Record, TagSet, Value};

pub mod builtin;
pub mod external;
pub mod naming;
pub mod treesitter;

#[cfg(test)]
mod naming_tests;

pub use builtin::*;
pub use external::ExternalBackend;
pub use treesitter::TreeSitterBackend;

/// Shared handle to a backend.
pub type BackendRef = Arc<dyn Backend>;

/// An AST-producing parser.
pub trait Backend: Send + Sync {
    /// Identifier used on the command line and in configuration.
    fn name(&self) -> &str;

    /// PascalCase label used in snapshot file names.
    fn label(&self) -> &str;

    /// Node and token type tags this backend emits.
    fn tags(&self) -> TagSet;

    fn parse(&self, source: &str, options: &ParseOptions) -> Result<ParseOutput, BackendError>;
}

/// Options every backend is invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ParseOptions {
    /// Collect comments into `ParseOutput::comments`.
    pub comment: bool,
    /// Enable JSX syntax.
    pub jsx: bool,
    /// Attach `loc` to nodes and tokens.
    pub loc: bool,
    /// Attach `range` to nodes and tokens.
    pub range: bool,
    /// Produce the token list.
    pub tokens: bool,
}

impl ParseOptions {
    /// The option set used for fixtures: no comments, full location info, tokens.
    pub fn for_fixture(jsx: bool) -> Self {
        Self {
            comment: false,
            jsx,
            loc: true,
            range: true,
            tokens: true,
        }
    }
}

/// A successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub ast: Value,
    pub tokens: Vec<Value>,
    pub comments: Vec<Value>,
}

/// Why a backend did not produce a tree.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The source was rejected.
    #[error("{message} ({line}:{column})")]
    Syntax {
        message: String,
        /// Byte offset of the offending node.
        index: usize,
        /// 1-based line.
        line: usize,
        /// 0-based column.
        column: usize,
    },

    /// An error object reported by an external parser.
    #[error("{}", reported_message(.0))]
    Reported(Record),

    #[error("failed to load grammar: {0}")]
    Language(String),

    #[error("parser produced no tree")]
    NoTree,

    #[error("backend panicked: {0}")]
    Panicked(String),

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` exited with {}: {stderr}", exit_code(*.code))]
    Exited {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`{program}` produced invalid output: {reason}")]
    InvalidOutput { program: String, reason: String },
}

impl BackendError {
    /// The value recorded in the Error snapshot.
    ///
    /// Errors are classed records, so they print with their own name and are
    /// never mistaken for AST nodes.
    pub fn to_value(&self) -> Value {
        match self {
            BackendError::Syntax {
                message,
                index,
                line,
                column,
            } => Record::with_class("ParseError")
                .field("column", *column)
                .field("index", *index)
                .field("lineNumber", *line)
                .field("message", message.as_str())
                .into(),
            BackendError::Reported(record) => Value::Object(record.clone()),
            other => Record::with_class("BackendError")
                .field("message", other.to_string())
                .into(),
        }
    }
}

fn reported_message(record: &Record) -> String {
    record
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("parse error")
        .to_owned()
}

fn exit_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_owned(),
    }
}
