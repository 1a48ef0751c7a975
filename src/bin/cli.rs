//! refgraph CLI - reference graph extraction for formal libraries.
//!
//! Usage:
//!   refgraph extract <root> --env <file>   # Write <root>.json
//!   refgraph stats <graph.json>            # Summarize a written graph

use clap::Parser;
use refgraph::cli::{run, Cli};
use refgraph::RefGraphConfig;

fn main() {
    let cli = Cli::parse();
    let (config, config_error) = match RefGraphConfig::try_load(&cli.config_path()) {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (RefGraphConfig::default(), Some(e)),
    };

    // Logs go to stderr; stdout carries the written path and summary.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.log_level))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "ignoring config file, using defaults");
    }

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
