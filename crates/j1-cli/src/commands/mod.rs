//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use j1_client::j1_core::Config;
use j1_client::Client;

pub mod audit;
pub mod integration;
pub mod query;
pub mod sync;

/// JupiterOne client - queries and bulk synchronization
#[derive(Parser)]
#[command(name = "j1")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API token
    #[arg(long, env = "J1_API_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Account id
    #[arg(long, env = "J1_ACCOUNT", global = true)]
    pub account: Option<String>,

    /// Region (defaults to "us")
    #[arg(long, env = "J1_REGION", global = true)]
    pub region: Option<String>,

    /// Override the API base URL entirely
    #[arg(long, env = "J1_BASE_URL", global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a deferred J1QL query
    Query(query::QueryArgs),

    /// Bulk synchronization jobs
    #[command(subcommand)]
    Sync(sync::SyncCommands),

    /// Integration definitions and instances
    #[command(subcommand)]
    Integration(integration::IntegrationCommands),

    /// Account audit events
    #[command(subcommand)]
    Audit(audit::AuditCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.config()?;
        let client = Client::new(&config).context("Failed to create JupiterOne client")?;

        match self.command {
            Commands::Query(args) => query::execute(args, &client).await,
            Commands::Sync(cmd) => sync::execute(cmd, &client).await,
            Commands::Integration(cmd) => integration::execute(cmd, &client).await,
            Commands::Audit(cmd) => audit::execute(cmd, &client).await,
        }
    }

    fn config(&self) -> Result<Config> {
        let token = self
            .token
            .clone()
            .context("No API token. Pass --token or set J1_API_TOKEN.")?;
        let account = self
            .account
            .clone()
            .context("No account id. Pass --account or set J1_ACCOUNT.")?;

        let mut config = Config::new(token, account);
        config.region = self.region.clone();
        config.base_url = self.base_url.clone();
        Ok(config)
    }
}
