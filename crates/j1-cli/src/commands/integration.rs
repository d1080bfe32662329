//! Integration listing commands.

use anyhow::Result;
use clap::Subcommand;

use j1_client::Client;

use crate::output;

#[derive(Subcommand)]
pub enum IntegrationCommands {
    /// List available integration definitions
    Definitions {
        /// Cursor from a previous page
        #[arg(long)]
        cursor: Option<String>,
    },

    /// Show one integration instance with its config
    Get {
        /// Integration instance ID
        id: String,
    },

    /// List configured integration instances
    Instances {
        /// Cursor from a previous page
        #[arg(long)]
        cursor: Option<String>,
    },
}

pub async fn execute(cmd: IntegrationCommands, client: &Client) -> Result<()> {
    let integrations = client.integrations();

    match cmd {
        IntegrationCommands::Definitions { cursor } => {
            let page = integrations.list_definitions(cursor.as_deref()).await?;
            output::print_definitions(&page.definitions);
            output::print_next_cursor(page.page_info.next_cursor());
        }
        IntegrationCommands::Get { id } => {
            let instance = integrations.get_instance(&id).await?;
            output::print_instances(std::slice::from_ref(&instance));
            println!("{}", serde_json::to_string_pretty(&instance.config)?);
        }
        IntegrationCommands::Instances { cursor } => {
            let page = integrations.list_instances(cursor.as_deref()).await?;
            output::print_instances(&page.instances);
            output::print_next_cursor(page.page_info.next_cursor());
        }
    }
    Ok(())
}
