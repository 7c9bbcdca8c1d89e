//! Name conversions between grammar identifiers and ESTree-style names.

/// Words that stay fully uppercase in type names.
const ACRONYMS: [&str; 2] = ["jsx", "ts"];

/// Convert a grammar node kind to a PascalCase type name.
///
/// `jsx_opening_element` becomes `JSXOpeningElement`, `lexical_declaration`
/// becomes `LexicalDeclaration`. Input already in PascalCase is returned
/// unchanged.
pub fn type_name(kind: &str) -> String {
    let starts_uppercase = kind.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    if starts_uppercase && !kind.contains(is_separator) {
        return kind.to_owned();
    }

    let mut out = String::with_capacity(kind.len());
    for word in kind.split(is_separator).filter(|w| !w.is_empty()) {
        if ACRONYMS.contains(&word) {
            out.push_str(&word.to_ascii_uppercase());
        } else {
            push_capitalized(&mut out, word);
        }
    }
    out
}

/// Convert a snake_case grammar field name to camelCase.
pub fn field_name(name: &str) -> String {
    let mut words = name.split(is_separator).filter(|w| !w.is_empty());
    let mut out = String::with_capacity(name.len());
    if let Some(first) = words.next() {
        out.push_str(&first.to_ascii_lowercase());
    }
    for word in words {
        push_capitalized(&mut out, word);
    }
    out
}

/// Convert a backend name such as `tree-sitter` to the label used in
/// snapshot file names (`TreeSitter`).
pub fn label(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split(is_separator).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }
    out
}

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | '.' | ' ')
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.push(first.to_ascii_uppercase());
        out.extend(chars.map(|c| c.to_ascii_lowercase()));
    }
}
