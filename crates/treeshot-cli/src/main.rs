#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod cli;
mod commands;

use cli::{AstParams, BackendsParams, ListParams, RunParams, build_cli};
use tracing_subscriber::{EnvFilter, fmt};

/// Log filter, e.g. `TREESHOT_LOG=treeshot_harness=debug`.
const LOG_ENV: &str = "TREESHOT_LOG";

fn main() {
    init_logging();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", m)) => {
            let params = RunParams::from_matches(m);
            commands::run::run(params.into());
        }
        Some(("list", m)) => {
            let params = ListParams::from_matches(m);
            commands::list::run(params.into());
        }
        Some(("ast", m)) => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        Some(("backends", m)) => {
            let _params = BackendsParams::from_matches(m);
            commands::backends::run();
        }
        _ => unreachable!("clap should have caught this"),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing::subscriber::set_global_default(
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish(),
    );
}
