//! Canonical rendering of AST nodes and tokens.
//!
//! Backends populate node fields in their own order and disagree on which
//! optional fields are present. This plugin renders a node with its extra
//! fields sorted by name, unset fields dropped, and `range`/`loc` moved to a
//! fixed trailing block:
//!
//! ```text
//! Identifier {
//!   type: "Identifier",
//!   name: "foo",
//!
//!   range: [0, 3],
//!   loc: {
//!     start: { column: 0, line: 1 },
//!     end: { column: 3, line: 1 },
//!   },
//! }
//! ```

use std::cmp::Ordering;

use crate::print::{Plugin, Printer, format_number};
use crate::tags::TagSet;
use crate::value::{Record, Value};
use crate::{Result, SerializeError};

const RESERVED_FIELDS: [&str; 3] = ["type", "range", "loc"];

/// Plugin rendering plain records whose `type` tag is a known node or token type.
#[derive(Debug, Clone)]
pub struct NodeSerializer {
    tags: TagSet,
}

impl NodeSerializer {
    pub fn new(tags: TagSet) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }
}

impl Plugin for NodeSerializer {
    fn test(&self, value: &Value) -> bool {
        let Value::Object(record) = value else {
            return false;
        };
        record.is_plain() && record.type_tag().is_some_and(|tag| self.tags.contains(tag))
    }

    fn serialize(
        &self,
        value: &Value,
        printer: &Printer,
        indentation: &str,
        depth: usize,
    ) -> Result<String> {
        let Value::Object(node) = value else {
            return Err(SerializeError::NotARecord);
        };
        let type_name = node.type_tag().unwrap_or_default();
        let (start, end) = range_of(node, type_name)?;
        let loc = Location::of(node, type_name)?;

        let indent = &printer.config().indent;
        let child = format!("{indentation}{indent}");

        let mut lines = vec![
            format!("{type_name} {{"),
            format!("{child}type: \"{type_name}\","),
        ];

        for key in sorted_keys(node) {
            let Some(field) = node.get(key) else {
                continue;
            };
            if field.is_undefined() {
                continue;
            }
            let rendered = printer.print(field, &child, depth)?;
            lines.push(format!("{child}{key}: {rendered},"));
        }

        lines.push(String::new());
        lines.push(format!(
            "{child}range: [{}, {}],",
            format_number(start),
            format_number(end)
        ));
        lines.push(format!("{child}loc: {{"));
        lines.push(format!("{child}{indent}start: {},", loc.start));
        lines.push(format!("{child}{indent}end: {},", loc.end));
        lines.push(format!("{child}}},"));
        lines.push(format!("{indentation}}}"));

        Ok(lines.join("\n"))
    }
}

/// Extra field names in canonical order.
fn sorted_keys(node: &Record) -> Vec<&str> {
    let mut keys: Vec<&str> = node
        .keys()
        .filter(|key| !RESERVED_FIELDS.contains(key))
        .collect();
    keys.sort_by(|a, b| compare_keys(a, b));
    keys
}

/// Approximates `localeCompare` for ASCII identifiers: punctuation sorts
/// before digits, digits before letters, letters case-insensitively with
/// lowercase first on ties. Non-ASCII characters fall back to code-point
/// order after letters.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let folded = a.chars().map(collation_key).cmp(b.chars().map(collation_key));
    folded.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map(|(x, y)| match (x.is_ascii_lowercase(), y.is_ascii_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            })
            .unwrap_or(Ordering::Equal)
    })
}

/// Primary weight of a character: its class, then its case-folded value.
fn collation_key(c: char) -> (u8, char) {
    let class = if c.is_ascii_digit() {
        1
    } else if c.is_ascii_alphabetic() {
        2
    } else if c.is_ascii() {
        0
    } else {
        3
    };
    (class, c.to_ascii_lowercase())
}

fn range_of(node: &Record, type_name: &str) -> Result<(f64, f64)> {
    let malformed = |reason: &str| SerializeError::MalformedNode {
        type_name: type_name.to_owned(),
        reason: reason.to_owned(),
    };
    let range = node
        .get("range")
        .ok_or_else(|| malformed("missing `range`"))?
        .as_array()
        .ok_or_else(|| malformed("`range` is not an array"))?;
    match range {
        [start, end] => {
            let start = start
                .as_f64()
                .ok_or_else(|| malformed("`range` start is not a number"))?;
            let end = end
                .as_f64()
                .ok_or_else(|| malformed("`range` end is not a number"))?;
            Ok((start, end))
        }
        _ => Err(malformed("`range` must have exactly two offsets")),
    }
}

struct Location {
    start: Position,
    end: Position,
}

impl Location {
    fn of(node: &Record, type_name: &str) -> Result<Self> {
        let loc = node
            .get("loc")
            .and_then(Value::as_record)
            .ok_or_else(|| SerializeError::MalformedNode {
                type_name: type_name.to_owned(),
                reason: "missing `loc` record".to_owned(),
            })?;
        Ok(Self {
            start: Position::of(loc, "start", type_name)?,
            end: Position::of(loc, "end", type_name)?,
        })
    }
}

struct Position {
    line: f64,
    column: f64,
}

impl Position {
    fn of(loc: &Record, which: &str, type_name: &str) -> Result<Self> {
        let malformed = |reason: String| SerializeError::MalformedNode {
            type_name: type_name.to_owned(),
            reason,
        };
        let pos = loc
            .get(which)
            .and_then(Value::as_record)
            .ok_or_else(|| malformed(format!("missing `loc.{which}` record")))?;
        let number = |field: &str| {
            pos.get(field)
                .and_then(Value::as_f64)
                .ok_or_else(|| malformed(format!("`loc.{which}.{field}` is not a number")))
        };
        Ok(Self {
            line: number("line")?,
            column: number("column")?,
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ column: {}, line: {} }}",
            format_number(self.column),
            format_number(self.line)
        )
    }
}
