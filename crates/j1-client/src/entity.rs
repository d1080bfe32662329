//! Entity mutations.

use serde_json::json;

use j1_core::domain::graph::{CreatedEntity, EntityProperties};
use j1_core::J1Result;

use crate::Client;

const CREATE_ENTITY: &str = r#"
mutation CreateEntity(
  $entityKey: String!
  $entityType: String!
  $entityClass: [String!]!
  $properties: JSON
) {
  createEntity(
    entityKey: $entityKey
    entityType: $entityType
    entityClass: $entityClass
    properties: $properties
  ) {
    entity {
      _id
    }
    vertex {
      id
      entity {
        _id
      }
    }
  }
}"#;

/// Creates entities in the graph.
#[derive(Clone)]
pub struct EntityService {
    client: Client,
}

impl EntityService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create an entity with the given `_key`, `_type`, `_class` and properties.
    pub async fn create(&self, properties: &EntityProperties) -> J1Result<CreatedEntity> {
        let variables = json!({
            "entityKey": properties.key,
            "entityType": properties.entity_type,
            "entityClass": properties.class,
            "properties": properties.properties,
        });
        self.client
            .graphql_field(CREATE_ENTITY, variables, "createEntity")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedGraphql, ScriptedHttp};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_sends_all_variables() {
        let graphql = Arc::new(ScriptedGraphql::replying(json!({
            "createEntity": {
                "entity": {"_id": "e-1"},
                "vertex": {"id": "v-1", "entity": {"_id": "e-1"}}
            }
        })));
        let client = Client::with_transports(Arc::new(ScriptedHttp::default()), graphql.clone(), "http://j1");

        let mut props = serde_json::Map::new();
        props.insert("owner".to_string(), json!("sec-team"));
        let created = client
            .entities()
            .create(&EntityProperties {
                key: "host-1".to_string(),
                entity_type: "custom_host".to_string(),
                class: vec!["Host".to_string()],
                properties: Some(props),
            })
            .await
            .unwrap();

        assert_eq!(created.entity.id, "e-1");
        assert_eq!(created.vertex.id, "v-1");
        let vars = graphql.last_variables();
        assert_eq!(vars["entityKey"], "host-1");
        assert_eq!(vars["entityClass"], json!(["Host"]));
        assert_eq!(vars["properties"]["owner"], "sec-team");
    }
}
