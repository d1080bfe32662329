//! Entity and relationship mutation models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Properties for creating an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityProperties {
    pub key: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub class: Vec<String>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

/// Reference to a persisted graph object by `_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    #[serde(rename = "_id")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRef {
    pub id: String,
    pub entity: ObjectRef,
}

/// Result of `createEntity`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedEntity {
    pub entity: ObjectRef,
    pub vertex: VertexRef,
}

/// Properties for creating a relationship between two entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipProperties {
    pub key: String,
    #[serde(rename = "type")]
    pub relationship_type: String,
    pub class: String,
    pub from_entity_id: String,
    pub to_entity_id: String,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRef {
    pub id: String,
    pub to_vertex_id: String,
    pub from_vertex_id: String,
    pub relationship: ObjectRef,
    #[serde(default)]
    pub properties: Value,
}

/// Result of `createRelationship` and `deleteRelationship`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipMutation {
    pub relationship: ObjectRef,
    pub edge: EdgeRef,
}
