//! Audit event commands.

use anyhow::Result;
use clap::Subcommand;

use j1_client::Client;

use crate::output;

#[derive(Subcommand)]
pub enum AuditCommands {
    /// List recent audit events
    List {
        /// Page size (0 uses the service default)
        #[arg(long, default_value = "0")]
        limit: u32,

        /// Cursor from a previous page
        #[arg(long)]
        cursor: Option<String>,
    },
}

pub async fn execute(cmd: AuditCommands, client: &Client) -> Result<()> {
    match cmd {
        AuditCommands::List { limit, cursor } => {
            let page = client
                .audit()
                .list_events(limit, cursor.as_deref().unwrap_or_default())
                .await?;
            output::print_audit_events(&page.items);
            output::print_next_cursor(page.page_info.next_cursor());
        }
    }
    Ok(())
}
