//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("treeshot")
        .about("Golden snapshot conformance harness for AST-producing parsers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(run_command())
        .subcommand(list_command())
        .subcommand(ast_command())
        .subcommand(backends_command())
}

/// Run fixtures and compare against stored snapshots.
pub fn run_command() -> Command {
    Command::new("run")
        .about("Run fixtures and compare against snapshots")
        .arg(root_arg())
        .arg(config_arg())
        .arg(only_arg())
        .arg(update_arg())
        .arg(ci_arg())
        .arg(backend_arg())
        .after_help(
            r#"ENVIRONMENT:
  TREESHOT_ONLY     focus selector (overridden by --only)
  TREESHOT_UPDATE   new | all | none (overridden by --update/--ci)
  TREESHOT_LOG      log filter, e.g. debug

EXAMPLES:
  treeshot run corpus
  treeshot run --only declaration/ClassDeclaration/abstract
  treeshot run --ci"#,
        )
}

/// Print the test tree without running anything.
pub fn list_command() -> Command {
    Command::new("list")
        .about("Show discovered fixtures as a test tree")
        .arg(root_arg())
        .arg(config_arg())
        .arg(only_arg())
}

/// Print the canonical rendering of one file.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Print the canonical AST of a source file")
        .arg(source_path_arg())
        .arg(single_backend_arg())
        .arg(tokens_arg())
        .arg(jsx_arg())
}

/// List built-in backends.
pub fn backends_command() -> Command {
    Command::new("backends").about("List built-in backends")
}
