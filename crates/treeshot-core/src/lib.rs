#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for treeshot.
//!
//! - `value`: the dynamic tree shape backends produce (`Value`, `Record`)
//! - `tags`: node/token type vocabularies (`TagSet`)
//! - `print`: the generic printer and its plugin seam (`Printer`, `Plugin`)
//! - `node`: the canonical node/token serializer (`NodeSerializer`)
//!
//! The canonical form is deterministic: two trees that differ only in the
//! order fields were inserted render to identical text.

pub mod node;
pub mod print;
pub mod tags;
pub mod value;

#[cfg(test)]
mod node_tests;
#[cfg(test)]
mod value_tests;

pub use node::NodeSerializer;
pub use print::{Plugin, PrintConfig, Printer};
pub use tags::TagSet;
pub use value::{Record, Value};

/// Errors raised while rendering a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SerializeError {
    /// A value claimed a known node/token type but does not have the node shape.
    #[error("malformed `{type_name}` node: {reason}")]
    MalformedNode { type_name: String, reason: String },

    #[error("node serializer received a non-record value")]
    NotARecord,
}

pub type Result<T> = std::result::Result<T, SerializeError>;

/// Build the canonical printer for a tag vocabulary.
pub fn canonical_printer(tags: TagSet) -> Printer {
    Printer::new().with_plugin(NodeSerializer::new(tags))
}
