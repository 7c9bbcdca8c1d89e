use std::sync::{Arc, LazyLock};

use crate::BackendRef;
use crate::treesitter::TreeSitterBackend;

/// Names accepted for the built-in backends.
pub const BUILTIN_NAMES: [&str; 1] = ["tree-sitter"];

/// The tree-sitter TypeScript/TSX backend.
pub fn tree_sitter() -> BackendRef {
    static BACKEND: LazyLock<BackendRef> =
        LazyLock::new(|| Arc::new(TreeSitterBackend::typescript()));
    Arc::clone(&BACKEND)
}

pub fn from_name(s: &str) -> Option<BackendRef> {
    match s.to_ascii_lowercase().as_str() {
        "tree-sitter" | "treesitter" | "ts" => Some(tree_sitter()),
        _ => None,
    }
}

pub fn all() -> Vec<BackendRef> {
    vec![tree_sitter()]
}
