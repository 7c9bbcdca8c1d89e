//! Backend that runs an external parser process.
//!
//! The program receives the source on stdin and the parse options as JSON in
//! the `TREESHOT_PARSE_OPTIONS` environment variable. It answers on stdout
//! with one JSON document, either
//!
//! ```json
//! { "ast": { ... }, "tokens": [ ... ], "comments": [ ... ] }
//! ```
//!
//! or, when it rejects the source,
//!
//! ```json
//! { "error": { "name": "TSError", "message": "...", ... } }
//! ```

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use treeshot_core::{Record, TagSet, Value};

use crate::naming::label;
use crate::{Backend, BackendError, ParseOptions, ParseOutput};

/// Environment variable carrying the parse options.
pub const OPTIONS_ENV: &str = "TREESHOT_PARSE_OPTIONS";

#[derive(Debug, Clone)]
pub struct ExternalBackend {
    name: String,
    label: String,
    program: String,
    args: Vec<String>,
    tags: TagSet,
}

impl ExternalBackend {
    /// An external backend emitting the ESTree vocabulary.
    pub fn new(name: impl Into<String>, program: impl Into<String>, args: Vec<String>) -> Self {
        let name = name.into();
        Self {
            label: label(&name),
            name,
            program: program.into(),
            args,
            tags: TagSet::estree(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Extend the vocabulary with backend-specific node and token types.
    pub fn with_tags(mut self, tags: &TagSet) -> Self {
        self.tags.merge(tags);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Backend for ExternalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn tags(&self) -> TagSet {
        self.tags.clone()
    }

    fn parse(&self, source: &str, options: &ParseOptions) -> Result<ParseOutput, BackendError> {
        let options = serde_json::to_string(options).map_err(|e| self.invalid(e.to_string()))?;
        tracing::debug!(program = %self.program, args = ?self.args, "spawning parser");

        let spawn_error = |source| BackendError::Spawn {
            program: self.program.clone(),
            source,
        };
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(OPTIONS_ENV, options)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // The child may write stdout before it has drained stdin.
        let writer = child.stdin.take().map(|mut stdin| {
            let bytes = source.as_bytes().to_vec();
            std::thread::spawn(move || stdin.write_all(&bytes))
        });
        let output = child.wait_with_output().map_err(spawn_error)?;
        let written = match writer.map(|w| w.join()) {
            None => Ok(()),
            Some(Ok(result)) => result,
            Some(Err(_)) => return Err(self.invalid("stdin writer panicked".to_owned())),
        };

        if !output.status.success() {
            return Err(BackendError::Exited {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        // A parser may answer without draining stdin; its exit status decides.
        match written {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                tracing::debug!(program = %self.program, "parser closed stdin early");
            }
            other => other.map_err(spawn_error)?,
        }

        decode(&output.stdout).map_err(|e| match e {
            Decode::Rejected(record) => BackendError::Reported(record),
            Decode::Invalid(reason) => self.invalid(reason),
        })
    }
}

impl ExternalBackend {
    fn invalid(&self, reason: String) -> BackendError {
        BackendError::InvalidOutput {
            program: self.program.clone(),
            reason,
        }
    }
}

#[derive(Debug)]
pub(crate) enum Decode {
    Rejected(Record),
    Invalid(String),
}

/// Decode the stdout document of an external parser.
pub(crate) fn decode(stdout: &[u8]) -> Result<ParseOutput, Decode> {
    let document: serde_json::Value =
        serde_json::from_slice(stdout).map_err(|e| Decode::Invalid(e.to_string()))?;
    let serde_json::Value::Object(mut document) = document else {
        return Err(Decode::Invalid("expected a JSON object".to_owned()));
    };

    if let Some(error) = document.remove("error") {
        return Err(Decode::Rejected(error_record(error)));
    }

    let ast = document
        .remove("ast")
        .ok_or_else(|| Decode::Invalid("missing `ast`".to_owned()))?;
    Ok(ParseOutput {
        ast: Value::from(ast),
        tokens: list(&mut document, "tokens")?,
        comments: list(&mut document, "comments")?,
    })
}

fn list(
    document: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Result<Vec<Value>, Decode> {
    match document.remove(key) {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(serde_json::Value::Array(items)) => Ok(items.into_iter().map(Value::from).collect()),
        Some(_) => Err(Decode::Invalid(format!("`{key}` is not an array"))),
    }
}

/// Error objects become records classed by their `name`.
fn error_record(error: serde_json::Value) -> Record {
    match error {
        serde_json::Value::Object(fields) => {
            let class = fields
                .get("name")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("Error")
                .to_owned();
            let mut record = Record::with_class(class);
            for (key, value) in fields {
                if key != "name" {
                    record.insert(key, Value::from(value));
                }
            }
            record
        }
        serde_json::Value::String(message) => Record::with_class("Error").field("message", message),
        other => Record::with_class("Error").field("message", other.to_string()),
    }
}
