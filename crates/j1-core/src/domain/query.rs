//! Deferred query input and result models.
//!
//! Query results come back as opaque JSON. Their shape depends on the J1QL
//! statement: plain `FIND` returns a list of vertices, `RETURN TREE` a
//! vertex/edge graph and `RETURN x.prop` a table of rows.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{J1Error, J1Result};

/// Format of the deferred result document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeferredResponseFormat {
    #[default]
    Json,
    Csv,
}

/// Whether the service must defer the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeferredResponseOption {
    /// Always return a polling URL, never an inline result.
    #[default]
    Force,
    Disabled,
}

/// Query execution flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFlags {
    pub all_pages: bool,
    pub computed_properties: bool,
    pub row_metadata: bool,
    pub variable_result_size: bool,
}

impl QueryFlags {
    /// Fetch every page; no computed properties, row metadata or variable sizing.
    pub fn all_pages() -> Self {
        Self {
            all_pages: true,
            ..Self::default()
        }
    }
}

/// Input for a deferred J1QL query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInput {
    pub query: String,
    pub cursor: Option<String>,
    pub deferred_format: Option<DeferredResponseFormat>,
    pub deferred_response: Option<DeferredResponseOption>,
    pub dry_run: bool,
    pub flags: Option<QueryFlags>,
    pub include_deleted: bool,
    pub remember: bool,
    pub variables: Option<Map<String, Value>>,
}

impl QueryInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Fill unset options: all pages, JSON format, forced deferral.
    pub fn with_defaults(mut self) -> Self {
        self.flags.get_or_insert_with(QueryFlags::all_pages);
        self.deferred_format.get_or_insert(DeferredResponseFormat::Json);
        self.deferred_response.get_or_insert(DeferredResponseOption::Force);
        self
    }

    /// GraphQL variables for the `QueryJupiterOne` operation.
    pub fn to_variables(&self) -> J1Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// State reported by the deferred result URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeferredStatus {
    InProgress,
    Finished,
    Other(String),
}

impl From<String> for DeferredStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "IN_PROGRESS" => Self::InProgress,
            "FINISHED" => Self::Finished,
            _ => Self::Other(value),
        }
    }
}

impl From<DeferredStatus> for String {
    fn from(status: DeferredStatus) -> Self {
        match status {
            DeferredStatus::InProgress => "IN_PROGRESS".to_string(),
            DeferredStatus::Finished => "FINISHED".to_string(),
            DeferredStatus::Other(s) => s,
        }
    }
}

/// Body returned while polling a deferred query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeferredQueryStatus {
    pub url: String,
    pub status: DeferredStatus,
}

/// Entity attached to a query vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexEntity {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub entity_type: Vec<String>,
    #[serde(rename = "_class")]
    pub class: Vec<String>,
    #[serde(rename = "_deleted")]
    pub deleted: bool,
    #[serde(rename = "_version")]
    pub version: i64,
    #[serde(rename = "_createdOn")]
    pub created_on: Value,
    #[serde(rename = "_beginOn")]
    pub begin_on: Value,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "_integrationName")]
    pub integration_name: String,
    #[serde(rename = "_integrationType")]
    pub integration_type: String,
    #[serde(rename = "_integrationClass")]
    pub integration_class: Value,
    #[serde(rename = "_integrationInstanceId")]
    pub integration_instance_id: Value,
    #[serde(rename = "_integrationDefinitionId")]
    pub integration_definition_id: String,
    #[serde(rename = "_source")]
    pub source: String,
    #[serde(rename = "_scope")]
    pub scope: String,
    #[serde(rename = "_accountId")]
    pub account_id: String,
}

/// Relationship attached to a query edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeRelationship {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub relationship_type: String,
    #[serde(rename = "_class")]
    pub class: String,
    #[serde(rename = "_fromEntityId")]
    pub from_entity_id: String,
    #[serde(rename = "_fromEntityKey")]
    pub from_entity_key: String,
    #[serde(rename = "_toEntityId")]
    pub to_entity_id: String,
    #[serde(rename = "_toEntityKey")]
    pub to_entity_key: String,
    #[serde(rename = "_deleted")]
    pub deleted: bool,
    #[serde(rename = "_version")]
    pub version: i64,
    #[serde(rename = "_createdOn")]
    pub created_on: Value,
    #[serde(rename = "_beginOn")]
    pub begin_on: Value,
    #[serde(rename = "_source")]
    pub source: String,
    #[serde(rename = "_scope")]
    pub scope: String,
    #[serde(rename = "_accountId")]
    pub account_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDataVertex {
    pub id: String,
    #[serde(default)]
    pub entity: VertexEntity,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDataEdge {
    pub id: String,
    pub to_vertex_id: String,
    pub from_vertex_id: String,
    #[serde(default)]
    pub relationship: EdgeRelationship,
    #[serde(default)]
    pub properties: Value,
}

/// `RETURN TREE` result body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDataTree {
    pub vertices: Vec<QueryDataVertex>,
    pub edges: Vec<QueryDataEdge>,
}

pub type QueryDataTable = Vec<Map<String, Value>>;

/// A query result reinterpreted with a concrete `data` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult<T> {
    #[serde(rename = "type", default)]
    pub result_type: String,
    pub data: T,
    #[serde(default)]
    pub cursor: Option<String>,
}

impl<T: DeserializeOwned> QueryResult<T> {
    /// Reinterpret an opaque result; fails with a decode error on shape mismatch.
    pub fn from_value(raw: &Value) -> J1Result<Self> {
        Ok(QueryResult::<T>::deserialize(raw)?)
    }
}

/// Result shapes keyed by the declared `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedQueryResult {
    List(QueryResult<Vec<QueryDataVertex>>),
    Tree(QueryResult<QueryDataTree>),
    Table(QueryResult<QueryDataTable>),
}

impl TypedQueryResult {
    /// Decode using the declared `type`; infer from `data` when it is absent
    /// or not one of `list`, `tree`, `table`.
    pub fn from_value(raw: &Value) -> J1Result<Self> {
        let declared = raw.get("type").and_then(Value::as_str).unwrap_or_default();
        let kind = match declared {
            "list" | "tree" | "table" => declared,
            _ => infer_kind(raw.get("data"))?,
        };

        Ok(match kind {
            "tree" => Self::Tree(QueryResult::from_value(raw)?),
            "table" => Self::Table(QueryResult::from_value(raw)?),
            _ => Self::List(QueryResult::from_value(raw)?),
        })
    }

    pub fn cursor(&self) -> Option<&str> {
        match self {
            Self::List(r) => r.cursor.as_deref(),
            Self::Tree(r) => r.cursor.as_deref(),
            Self::Table(r) => r.cursor.as_deref(),
        }
    }

    /// Number of top-level items (vertices for trees).
    pub fn len(&self) -> usize {
        match self {
            Self::List(r) => r.data.len(),
            Self::Tree(r) => r.data.vertices.len(),
            Self::Table(r) => r.data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn infer_kind(data: Option<&Value>) -> J1Result<&'static str> {
    match data {
        Some(Value::Object(map)) if map.contains_key("vertices") => Ok("tree"),
        Some(Value::Array(items)) => {
            let vertices = items
                .iter()
                .all(|item| item.get("id").is_some() && item.get("entity").is_some());
            Ok(if vertices { "list" } else { "table" })
        }
        _ => Err(J1Error::Decode(serde_json::Error::custom(
            "query result has no recognizable data shape",
        ))),
    }
}
