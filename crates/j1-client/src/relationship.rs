//! Relationship mutations.

use serde_json::json;

use j1_core::domain::graph::{RelationshipMutation, RelationshipProperties};
use j1_core::J1Result;

use crate::Client;

const RELATIONSHIP_FIELDS: &str = r#"
    relationship {
      _id
    }
    edge {
      id
      toVertexId
      fromVertexId
      relationship {
        _id
      }
      properties
    }"#;

fn create_relationship_mutation() -> String {
    format!(
        r#"
mutation CreateRelationship(
  $relationshipKey: String!
  $relationshipType: String!
  $relationshipClass: String!
  $fromEntityId: String!
  $toEntityId: String!
  $properties: JSON
) {{
  createRelationship(
    relationshipKey: $relationshipKey
    relationshipType: $relationshipType
    relationshipClass: $relationshipClass
    fromEntityId: $fromEntityId
    toEntityId: $toEntityId
    properties: $properties
  ) {{{RELATIONSHIP_FIELDS}
  }}
}}"#
    )
}

fn delete_relationship_mutation() -> String {
    format!(
        r#"
mutation DeleteRelationship($relationshipId: String!, $timestamp: Long) {{
  deleteRelationship(relationshipId: $relationshipId, timestamp: $timestamp) {{{RELATIONSHIP_FIELDS}
  }}
}}"#
    )
}

/// Creates and deletes relationships between entities.
#[derive(Clone)]
pub struct RelationshipService {
    client: Client,
}

impl RelationshipService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        properties: &RelationshipProperties,
    ) -> J1Result<RelationshipMutation> {
        let variables = json!({
            "relationshipKey": properties.key,
            "relationshipType": properties.relationship_type,
            "relationshipClass": properties.class,
            "fromEntityId": properties.from_entity_id,
            "toEntityId": properties.to_entity_id,
            "properties": properties.properties,
        });
        self.client
            .graphql_field(&create_relationship_mutation(), variables, "createRelationship")
            .await
    }

    /// Delete a relationship by `_id`.
    pub async fn delete(&self, id: &str) -> J1Result<RelationshipMutation> {
        self.client
            .graphql_field(
                &delete_relationship_mutation(),
                json!({ "relationshipId": id }),
                "deleteRelationship",
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedGraphql, ScriptedHttp};
    use std::sync::Arc;

    fn mutation_result(field: &str) -> serde_json::Value {
        let mut data = serde_json::Map::new();
        data.insert(
            field.to_string(),
            json!({
                "relationship": {"_id": "r-1"},
                "edge": {
                    "id": "x-1",
                    "toVertexId": "v-2",
                    "fromVertexId": "v-1",
                    "relationship": {"_id": "r-1"},
                    "properties": null
                }
            }),
        );
        serde_json::Value::Object(data)
    }

    #[tokio::test]
    async fn test_create_relationship() {
        let graphql = Arc::new(ScriptedGraphql::replying(mutation_result("createRelationship")));
        let client = Client::with_transports(Arc::new(ScriptedHttp::default()), graphql.clone(), "http://j1");
        let created = client
            .relationships()
            .create(&RelationshipProperties {
                key: "a|has|b".to_string(),
                relationship_type: "host_has_app".to_string(),
                class: "HAS".to_string(),
                from_entity_id: "e-a".to_string(),
                to_entity_id: "e-b".to_string(),
                properties: None,
            })
            .await
            .unwrap();

        assert_eq!(created.edge.from_vertex_id, "v-1");
        let (query, vars) = graphql.calls().pop().unwrap();
        assert!(query.contains("createRelationship("));
        assert_eq!(vars["relationshipClass"], "HAS");
        assert_eq!(vars["fromEntityId"], "e-a");
    }

    #[tokio::test]
    async fn test_delete_relationship_sends_id() {
        let graphql = Arc::new(ScriptedGraphql::replying(mutation_result("deleteRelationship")));
        let client = Client::with_transports(Arc::new(ScriptedHttp::default()), graphql.clone(), "http://j1");
        let deleted = client.relationships().delete("r-1").await.unwrap();
        assert_eq!(deleted.relationship.id, "r-1");
        assert_eq!(graphql.last_variables(), json!({"relationshipId": "r-1"}));
    }
}
