//! j1 - JupiterOne command-line client
//!
//! Runs deferred J1QL queries and drives bulk synchronization jobs.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

/// Initialize tracing on stderr so command output on stdout stays pipeable.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "j1=debug,j1_client=debug"
    } else {
        "j1=info,j1_client=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute().await
}
