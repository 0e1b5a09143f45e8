//! CLI entry point for the creative relay.

mod cli;
mod commands;
mod output;

use clap::Parser;
use creative_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load the nearest `.env` walking up from the working directory.
/// Variables already present in the process environment win.
fn load_env_file() {
    let Ok(mut dir) = std::env::current_dir() else {
        return;
    };
    for _ in 0..32 {
        let env_file = dir.join(".env");
        if env_file.exists() {
            let _ = dotenvy::from_path(&env_file);
            break;
        }
        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => break,
        }
    }
}

fn init_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env()
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_default_log_level("warn");
    if verbose {
        config = config.with_log_level("debug");
    }
    if let Err(e) = creative_observability::init(config) {
        output::warning(&format!("logging disabled: {e}"));
    }
}

#[tokio::main]
async fn main() {
    load_env_file();
    let cli = Cli::parse();
    output::init(cli.output);
    init_logging(cli.verbose);

    let result = commands::handle(cli).await;
    creative_observability::shutdown();

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
