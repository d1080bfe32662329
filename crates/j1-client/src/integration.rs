//! Integration definitions and instances.

use serde_json::{json, Map, Value};
use tracing::info;

use j1_core::domain::integration::{
    IntegrationDefinitionPage, IntegrationInstance, IntegrationInstancePage,
};
use j1_core::J1Result;

use crate::Client;

const LIST_DEFINITIONS: &str = r#"
query IntegrationDefinitions($cursor: String) {
  integrationDefinitions(cursor: $cursor) {
    definitions {
      id
      integrationType
      integrationClass
      name
      repoWebLink
      title
      configFields
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}"#;

const LIST_INSTANCES: &str = r#"
query IntegrationInstances($cursor: String) {
  integrationInstances(cursor: $cursor) {
    instances {
      id
      name
      integrationDefinitionId
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}"#;

const INSTANCE_FIELDS: &str = r#"
    id
    name
    accountId
    description
    pollingInterval
    integrationDefinitionId
    config"#;

fn get_instance_query() -> String {
    format!(
        r#"
query IntegrationInstance($id: String!) {{
  integrationInstance(id: $id) {{{INSTANCE_FIELDS}
  }}
}}"#
    )
}

fn update_instance_mutation() -> String {
    format!(
        r#"
mutation UpdateIntegrationInstance($id: String!, $update: UpdateIntegrationInstanceInput!) {{
  updateIntegrationInstance(id: $id, update: $update) {{{INSTANCE_FIELDS}
  }}
}}"#
    )
}

fn cursor_variables(cursor: Option<&str>) -> Value {
    let mut variables = Map::new();
    if let Some(cursor) = cursor {
        variables.insert("cursor".to_string(), json!(cursor));
    }
    Value::Object(variables)
}

/// Lists integration definitions and manages configured instances.
///
/// Pass `None` for the first page, then `page_info.next_cursor()` until it
/// returns `None`.
#[derive(Clone)]
pub struct IntegrationService {
    client: Client,
}

impl IntegrationService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn list_definitions(&self, cursor: Option<&str>) -> J1Result<IntegrationDefinitionPage> {
        self.client
            .graphql_field(LIST_DEFINITIONS, cursor_variables(cursor), "integrationDefinitions")
            .await
    }

    pub async fn list_instances(&self, cursor: Option<&str>) -> J1Result<IntegrationInstancePage> {
        self.client
            .graphql_field(LIST_INSTANCES, cursor_variables(cursor), "integrationInstances")
            .await
    }

    /// Fetch one instance including its `config`.
    pub async fn get_instance(&self, id: &str) -> J1Result<IntegrationInstance> {
        self.client
            .graphql_field(&get_instance_query(), json!({ "id": id }), "integrationInstance")
            .await
    }

    /// Replace an instance's `config`. Fetch it first and send back the full
    /// map with your edits applied.
    pub async fn update_instance(
        &self,
        id: &str,
        config: &Map<String, Value>,
    ) -> J1Result<IntegrationInstance> {
        info!(id, keys = config.len(), "Updating integration instance config");
        self.client
            .graphql_field(
                &update_instance_mutation(),
                json!({ "id": id, "update": { "config": config } }),
                "updateIntegrationInstance",
            )
            .await
    }
}
