//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Fixture root directory (positional).
pub fn root_arg() -> Arg {
    Arg::new("root")
        .value_name("ROOT")
        .value_parser(value_parser!(PathBuf))
        .help("Directory scanned for fixtures [default: config root or .]")
}

/// Config file (-c/--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Config file [default: ROOT/treeshot.toml when present]")
}

/// Focus selector (--only).
pub fn only_arg() -> Arg {
    Arg::new("only")
        .long("only")
        .value_name("PATH")
        .help("Run only the fixture at this path, e.g. declaration/ClassDeclaration/abstract")
}

/// Rewrite mismatching snapshots (-u/--update).
pub fn update_arg() -> Arg {
    Arg::new("update")
        .short('u')
        .long("update")
        .action(ArgAction::SetTrue)
        .conflicts_with("ci")
        .help("Rewrite snapshots that no longer match")
}

/// Never write snapshots (--ci).
pub fn ci_arg() -> Arg {
    Arg::new("ci")
        .long("ci")
        .action(ArgAction::SetTrue)
        .help("Never write snapshots; missing snapshots fail")
}

/// Backend selection (-b/--backend), repeatable.
pub fn backend_arg() -> Arg {
    Arg::new("backend")
        .short('b')
        .long("backend")
        .value_name("NAME")
        .action(ArgAction::Append)
        .help("Built-in backend to run (repeatable, replaces configured backends)")
}

/// Single backend for `ast` (-b/--backend).
pub fn single_backend_arg() -> Arg {
    Arg::new("backend")
        .short('b')
        .long("backend")
        .value_name("NAME")
        .default_value("tree-sitter")
        .help("Built-in backend")
}

/// Source file to parse (positional).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Source file to parse")
}

/// Also print tokens (--tokens).
pub fn tokens_arg() -> Arg {
    Arg::new("tokens")
        .long("tokens")
        .action(ArgAction::SetTrue)
        .help("Also print the token list")
}

/// Force JSX parsing (--jsx).
pub fn jsx_arg() -> Arg {
    Arg::new("jsx")
        .long("jsx")
        .action(ArgAction::SetTrue)
        .help("Enable JSX regardless of the file extension")
}
