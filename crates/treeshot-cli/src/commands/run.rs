use std::path::PathBuf;

use treeshot_harness::{Harness, UpdateMode};

use super::setup::{Overrides, resolve_config};

pub struct RunArgs {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub only: Option<String>,
    pub update: Option<UpdateMode>,
    pub backends: Vec<String>,
}

pub fn run(args: RunArgs) {
    let overrides = Overrides {
        root: args.root.as_deref(),
        config: args.config.as_deref(),
        only: args.only.as_deref(),
        update: args.update,
        backends: &args.backends,
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
    let report = match harness.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let failures = report.failures();
    if !failures.is_empty() {
        print!("{failures}");
    }
    println!("{}", report.summary());

    if !report.is_success() {
        std::process::exit(1);
    }
}
