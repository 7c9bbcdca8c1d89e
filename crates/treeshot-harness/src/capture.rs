//! Turning one backend invocation into the three compared values.
//!
//! A failed parse is data: the AST and Tokens values become the `"ERROR"`
//! sentinel and the error itself is captured. A successful parse captures
//! the `"NO ERROR"` sentinel in the Error channel. Nothing a backend does,
//! panicking included, escapes this module.

use std::panic::{AssertUnwindSafe, catch_unwind};

use treeshot_backends::{Backend, BackendError, ParseOptions, ParseOutput};
use treeshot_core::Value;

use crate::fixture::AssertionKind;

pub const ERROR_SENTINEL: &str = "ERROR";
pub const NO_ERROR_SENTINEL: &str = "NO ERROR";

#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub ast: Value,
    pub tokens: Value,
    pub error: Value,
}

impl Capture {
    pub fn from_result(result: Result<ParseOutput, BackendError>) -> Self {
        match result {
            // Comments are not compared.
            Ok(output) => Self {
                ast: output.ast,
                tokens: Value::Array(output.tokens),
                error: Value::from(NO_ERROR_SENTINEL),
            },
            Err(error) => Self {
                ast: Value::from(ERROR_SENTINEL),
                tokens: Value::from(ERROR_SENTINEL),
                error: error.to_value(),
            },
        }
    }

    pub fn value(&self, kind: AssertionKind) -> &Value {
        match kind {
            AssertionKind::Ast => &self.ast,
            AssertionKind::Tokens => &self.tokens,
            AssertionKind::Error => &self.error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.ast.as_str() == Some(ERROR_SENTINEL)
    }
}

/// Parse `source` with the fixture option set and capture the outcome.
pub fn capture(backend: &dyn Backend, source: &str, jsx: bool) -> Capture {
    let options = ParseOptions::for_fixture(jsx);
    let result = catch_unwind(AssertUnwindSafe(|| backend.parse(source, &options)))
        .unwrap_or_else(|payload| Err(BackendError::Panicked(panic_message(payload.as_ref()))));

    if let Err(error) = &result {
        tracing::debug!(backend = backend.name(), %error, "parse failed");
    }
    Capture::from_result(result)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
