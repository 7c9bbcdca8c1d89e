//! Built-in backend over the tree-sitter TypeScript grammars.
//!
//! The concrete syntax tree is lowered to ESTree-shaped records:
//! - every named node becomes a record whose `type` is the PascalCase kind
//! - grammar fields become camelCase record fields, an array when the field
//!   occurs more than once (`type` becomes `typeAnnotation`)
//! - named children without a field are collected under `children`
//! - named leaves carry their source `text`
//! - comments are split out of the tree into the comment list
//!
//! Positions follow ESTree conventions: `range` holds byte offsets, `loc`
//! lines are 1-based and columns 0-based.

use arborium_tree_sitter as tree_sitter;
use tree_sitter::{Language, Node, Parser};
use treeshot_core::{Record, TagSet, Value};

use crate::naming::{field_name, type_name};
use crate::{Backend, BackendError, ParseOptions, ParseOutput};

/// Token types emitted by the lexical pass.
const TOKEN_TYPES: [&str; 13] = [
    "Boolean",
    "Identifier",
    "JSXIdentifier",
    "JSXText",
    "Keyword",
    "Null",
    "Numeric",
    "Punctuator",
    "RegularExpression",
    "String",
    "Template",
    "Block",
    "Line",
];

/// Kinds emitted as a single token even though the grammar gives them children.
const ATOMIC_KINDS: [&str; 4] = ["string", "template_string", "regex", "jsx_text"];

pub struct TreeSitterBackend {
    name: &'static str,
    label: &'static str,
    plain: Language,
    jsx: Language,
    tags: TagSet,
}

impl TreeSitterBackend {
    /// TypeScript for plain fixtures, TSX for JSX fixtures.
    pub fn typescript() -> Self {
        Self::new(
            "tree-sitter",
            "TreeSitter",
            arborium_typescript::language().into(),
            arborium_tsx::language().into(),
        )
    }

    pub fn new(name: &'static str, label: &'static str, plain: Language, jsx: Language) -> Self {
        let mut tags = vocabulary(&plain);
        tags.merge(&vocabulary(&jsx));
        Self {
            name,
            label,
            plain,
            jsx,
            tags,
        }
    }

    fn language(&self, jsx: bool) -> &Language {
        if jsx { &self.jsx } else { &self.plain }
    }
}

impl Backend for TreeSitterBackend {
    fn name(&self) -> &str {
        self.name
    }

    fn label(&self) -> &str {
        self.label
    }

    fn tags(&self) -> TagSet {
        self.tags.clone()
    }

    fn parse(&self, source: &str, options: &ParseOptions) -> Result<ParseOutput, BackendError> {
        let mut parser = Parser::new();
        parser
            .set_language(self.language(options.jsx))
            .map_err(|e| BackendError::Language(e.to_string()))?;
        let tree = parser.parse(source, None).ok_or(BackendError::NoTree)?;
        let root = tree.root_node();

        if root.has_error()
            && let Some(node) = first_error(root)
        {
            return Err(syntax_error(node, source));
        }

        let mut lowering = Lowering {
            source,
            options,
            comments: Vec::new(),
            tokens: Vec::new(),
        };
        let ast = lowering.node(root);
        if options.tokens {
            lowering.collect_tokens(root);
        }
        tracing::trace!(
            tokens = lowering.tokens.len(),
            comments = lowering.comments.len(),
            "lowered tree"
        );

        Ok(ParseOutput {
            ast,
            tokens: lowering.tokens,
            comments: lowering.comments,
        })
    }
}

/// Node type names for every named kind of the grammar, plus the token types.
fn vocabulary(language: &Language) -> TagSet {
    let mut tags = TagSet::new();
    let count = language.node_kind_count();
    (0..count as u16)
        .filter(|&id| language.node_kind_is_named(id))
        .filter_map(|id| language.node_kind_for_id(id))
        .for_each(|kind| tags.add_node(type_name(kind)));
    tags.extend_tokens(TOKEN_TYPES);
    tags
}

/// First error or missing node in document order.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

fn syntax_error(node: Node, source: &str) -> BackendError {
    let message = if node.is_missing() {
        format!("'{}' expected.", node.kind())
    } else {
        let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
        match text.split_whitespace().next() {
            Some(word) => format!("Unexpected token `{}`.", truncate(word, 24)),
            None => "Unexpected token.".to_owned(),
        }
    };
    let start = node.start_position();
    BackendError::Syntax {
        message,
        index: node.start_byte(),
        line: start.row + 1,
        column: start.column,
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

struct Lowering<'a> {
    source: &'a str,
    options: &'a ParseOptions,
    comments: Vec<Value>,
    tokens: Vec<Value>,
}

impl Lowering<'_> {
    fn text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    fn node(&mut self, node: Node) -> Value {
        let mut record = Record::new().field("type", type_name(node.kind()));
        let mut fields: Vec<(String, Vec<Value>)> = Vec::new();
        let mut children = Vec::new();

        let mut cursor = node.walk();
        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                if child.is_extra() && child.kind().contains("comment") {
                    self.comment(child);
                } else if child.is_named() {
                    let value = self.node(child);
                    match cursor.field_name() {
                        Some(name) => push_field(&mut fields, record_field(name), value),
                        None => children.push(value),
                    }
                }
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }

        for (name, mut values) in fields {
            let value = match values.len() {
                1 => values.pop().unwrap_or_default(),
                _ => Value::Array(values),
            };
            record.insert(name, value);
        }
        if !children.is_empty() {
            record.insert("children", children);
        }
        if node.named_child_count() == 0 {
            record.insert("text", self.text(node));
        }

        self.locate(&mut record, node);
        record.into()
    }

    fn comment(&mut self, node: Node) {
        if !self.options.comment {
            return;
        }
        let text = self.text(node);
        let (kind, value) = match text.strip_prefix("//") {
            Some(rest) => ("Line", rest),
            None => (
                "Block",
                text.strip_prefix("/*")
                    .and_then(|t| t.strip_suffix("*/"))
                    .unwrap_or(text),
            ),
        };
        let mut record = Record::new().field("type", kind).field("value", value);
        self.locate(&mut record, node);
        self.comments.push(record.into());
    }

    fn collect_tokens(&mut self, node: Node) {
        if node.is_extra() && node.kind().contains("comment") {
            return;
        }
        let atomic = ATOMIC_KINDS.contains(&node.kind());
        if atomic || node.child_count() == 0 {
            if node.end_byte() > node.start_byte() {
                self.token(node);
            }
            return;
        }
        let mut cursor = node.walk();
        if cursor.goto_first_child() {
            loop {
                self.collect_tokens(cursor.node());
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }
    }

    fn token(&mut self, node: Node) {
        let value = self.text(node);
        let kind = token_type(node, value);
        let mut record = Record::new().field("type", kind).field("value", value);
        self.locate(&mut record, node);
        self.tokens.push(record.into());
    }

    fn locate(&self, record: &mut Record, node: Node) {
        if self.options.range {
            record.insert(
                "range",
                vec![Value::from(node.start_byte()), Value::from(node.end_byte())],
            );
        }
        if self.options.loc {
            let start = node.start_position();
            let end = node.end_position();
            record.insert(
                "loc",
                Record::new()
                    .field("start", position(start.row, start.column))
                    .field("end", position(end.row, end.column)),
            );
        }
    }
}

/// Record field for a grammar field, moved off the names the node shape owns.
fn record_field(name: &str) -> String {
    match field_name(name).as_str() {
        "type" => "typeAnnotation".to_owned(),
        reserved @ ("range" | "loc" | "children" | "text") => format!("{reserved}Field"),
        other => other.to_owned(),
    }
}

fn push_field(fields: &mut Vec<(String, Vec<Value>)>, name: String, value: Value) {
    match fields.iter_mut().find(|(existing, _)| *existing == name) {
        Some((_, values)) => values.push(value),
        None => fields.push((name, vec![value])),
    }
}

fn position(row: usize, column: usize) -> Record {
    Record::new().field("line", row + 1).field("column", column)
}

/// Classify a leaf the way ESTree tokenizers do.
fn token_type(node: Node, text: &str) -> &'static str {
    // Type keywords such as `string` and `number` are anonymous nodes.
    if node.is_named() {
        match node.kind() {
            "string" => return "String",
            "template_string" => return "Template",
            "regex" => return "RegularExpression",
            "number" => return "Numeric",
            "true" | "false" => return "Boolean",
            "null" => return "Null",
            "jsx_text" => return "JSXText",
            kind if kind.ends_with("identifier") || kind == "undefined" => {
                let in_jsx = node.parent().is_some_and(|p| p.kind().starts_with("jsx_"));
                return if in_jsx { "JSXIdentifier" } else { "Identifier" };
            }
            _ => {}
        }
    }

    let word = text
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
    if word {
        "Keyword"
    } else {
        "Punctuator"
    }
}
