use std::path::PathBuf;

use treeshot_harness::{Focus, Harness};

use super::setup::{Overrides, resolve_config};

pub struct ListArgs {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub only: Option<String>,
}

pub fn run(args: ListArgs) {
    let overrides = Overrides {
        root: args.root.as_deref(),
        config: args.config.as_deref(),
        only: args.only.as_deref(),
        ..Overrides::default()
    };
    let config = match resolve_config(&overrides, |key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let backends = match config.build_backends() {
        Ok(backends) => backends,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let harness = Harness::new(config, backends);
    let fixtures = match harness.discover() {
        Ok(fixtures) => fixtures,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let tree = harness.tree(&fixtures);

    print!("{}", tree.render());
    if let Focus::Unmatched(selector) = tree.focus() {
        eprintln!("warning: `{selector}` matched no fixture");
    }
    println!("{} fixtures", fixtures.len());
}
