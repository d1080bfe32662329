//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use serde_json::{Map, Value};

use j1_client::j1_core::domain::audit::AuditEvent;
use j1_client::j1_core::domain::integration::{IntegrationDefinition, IntegrationInstance};
use j1_client::j1_core::domain::query::{QueryDataTable, QueryDataTree, QueryDataVertex, TypedQueryResult};
use j1_client::j1_core::domain::sync::SyncJob;

fn job_status_colored(status: &str) -> ColoredString {
    match status {
        "FINISHED" => status.green(),
        "ERROR_BAD_DATA" | "ERROR_UNEXPECTED_FAILURE" | "ABORTED" => status.red(),
        "AWAITING_UPLOADS" | "FINALIZE_PENDING" | "FINALIZING_ENTITIES"
        | "FINALIZING_RELATIONSHIPS" => status.yellow(),
        s => s.normal(),
    }
}

/// Print a synchronization job snapshot.
pub fn print_job(job: &SyncJob) {
    println!("{} {}", "Job".bold(), job.id.cyan());
    println!("  {}: {}", "Status".bold(), job_status_colored(&job.status));
    if !job.source.is_empty() {
        println!("  {}: {}", "Source".bold(), job.source);
    }
    if !job.scope.is_empty() {
        println!("  {}: {}", "Scope".bold(), job.scope);
    }
    println!(
        "  Entities:      {} uploaded, {} created, {} updated, {} deleted",
        job.num_entities_uploaded,
        job.num_entities_created,
        job.num_entities_updated,
        job.num_entities_deleted
    );
    println!(
        "  Relationships: {} uploaded, {} created, {} updated, {} deleted",
        job.num_relationships_uploaded,
        job.num_relationships_created,
        job.num_relationships_updated,
        job.num_relationships_deleted
    );

    let errors = job.total_errors();
    if errors > 0 {
        println!("  {}: {}", "Errors".bold(), errors.to_string().red());
    }
}

/// Print query vertices as a table.
pub fn print_vertices(vertices: &[QueryDataVertex]) {
    if vertices.is_empty() {
        println!("{}", "No results.".dimmed());
        return;
    }

    println!("{:<38} {:<24} {:<30}", "ID", "Type", "Name");
    println!("{}", "─".repeat(92));

    for vertex in vertices {
        let entity = &vertex.entity;
        let id = if entity.id.is_empty() { &vertex.id } else { &entity.id };
        println!(
            "{:<38} {:<24} {:<30}",
            id.dimmed(),
            truncate(&entity.entity_type.join(","), 22).cyan(),
            truncate(&entity.display_name, 30)
        );
    }
}

pub fn print_tree(tree: &QueryDataTree) {
    println!(
        "{} {} vertices, {} edges",
        "Tree:".bold(),
        tree.vertices.len(),
        tree.edges.len()
    );
    print_vertices(&tree.vertices);

    if !tree.edges.is_empty() {
        println!();
        for edge in &tree.edges {
            println!(
                "  {} {} {}",
                edge.from_vertex_id.dimmed(),
                format!("-[{}]->", edge.relationship.class).yellow(),
                edge.to_vertex_id.dimmed()
            );
        }
    }
}

fn print_table(rows: &QueryDataTable) {
    if rows.is_empty() {
        println!("{}", "No results.".dimmed());
        return;
    }
    for (i, row) in rows.iter().enumerate() {
        println!("{}: {}", (i + 1).to_string().dimmed(), format_row(row));
    }
}

fn format_row(row: &Map<String, Value>) -> String {
    row.iter()
        .map(|(column, value)| match value {
            Value::String(s) => format!("{column}={s}"),
            other => format!("{column}={other}"),
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Print a result decoded by its declared type.
pub fn print_query_result(result: &TypedQueryResult) {
    match result {
        TypedQueryResult::List(list) => print_vertices(&list.data),
        TypedQueryResult::Tree(tree) => print_tree(&tree.data),
        TypedQueryResult::Table(table) => print_table(&table.data),
    }
    print_next_cursor(result.cursor());
}

pub fn print_definitions(definitions: &[IntegrationDefinition]) {
    if definitions.is_empty() {
        println!("{}", "No integration definitions found.".dimmed());
        return;
    }

    println!("{:<38} {:<24} {:<30}", "ID", "Type", "Title");
    println!("{}", "─".repeat(92));
    for definition in definitions {
        println!(
            "{:<38} {:<24} {:<30}",
            definition.id.dimmed(),
            truncate(&definition.integration_type, 22).cyan(),
            truncate(&definition.title, 30)
        );
    }
}

pub fn print_instances(instances: &[IntegrationInstance]) {
    if instances.is_empty() {
        println!("{}", "No integration instances found.".dimmed());
        return;
    }

    println!("{:<38} {:<30} {:<38}", "ID", "Name", "Definition");
    println!("{}", "─".repeat(106));
    for instance in instances {
        println!(
            "{:<38} {:<30} {:<38}",
            instance.id.dimmed(),
            truncate(&instance.name, 28).cyan(),
            instance.integration_definition_id
        );
    }
}

pub fn print_audit_events(events: &[AuditEvent]) {
    if events.is_empty() {
        println!("{}", "No audit events found.".dimmed());
        return;
    }

    for event in events {
        let when = event
            .occurred_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} {} {} {}",
            when.dimmed(),
            event.category.yellow(),
            event.resource_type.cyan(),
            event.resource_id
        );
        if let Some(user) = &event.performed_by_user_id {
            println!("    by {}", user.dimmed());
        }
    }
}

pub fn print_next_cursor(cursor: Option<&str>) {
    if let Some(cursor) = cursor {
        println!("\n{} {}", "Next cursor:".bold(), cursor);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
