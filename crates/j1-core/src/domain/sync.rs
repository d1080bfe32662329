//! Bulk synchronization job models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the service reconciles uploaded data against what it already holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SyncMode {
    /// Delete anything in scope that was not uploaded.
    Diff,
    /// Only create or update; never delete.
    CreateOrUpdate,
    Other(String),
}

impl SyncMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Diff => "DIFF",
            Self::CreateOrUpdate => "CREATE_OR_UPDATE",
            Self::Other(mode) => mode,
        }
    }
}

impl From<String> for SyncMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DIFF" => Self::Diff,
            "CREATE_OR_UPDATE" => Self::CreateOrUpdate,
            _ => Self::Other(value),
        }
    }
}

impl From<SyncMode> for String {
    fn from(mode: SyncMode) -> Self {
        mode.as_str().to_string()
    }
}

impl std::str::FromStr for SyncMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

/// Parameters for starting a synchronization job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartParams {
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub source: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sync_mode: Option<SyncMode>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub integration_instance_id: Option<String>,
    /// Client-side flag, never sent to the service.
    #[serde(skip)]
    pub ignore_duplicates: bool,
}

impl StartParams {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_sync_mode(mut self, mode: SyncMode) -> Self {
        self.sync_mode = Some(mode);
        self
    }

    pub fn with_instance_id(mut self, id: impl Into<String>) -> Self {
        self.integration_instance_id = Some(id.into());
        self
    }
}

/// A batch of opaque entity and relationship records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub entities: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub relationships: Vec<Value>,
}

impl SyncPayload {
    pub fn entities(entities: Vec<Value>) -> Self {
        Self {
            entities,
            relationships: Vec::new(),
        }
    }

    pub fn relationships(relationships: Vec<Value>) -> Self {
        Self {
            entities: Vec::new(),
            relationships,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty()
    }
}

/// Service-side snapshot of a synchronization job.
///
/// Counters are reported by the service and relayed as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncJob {
    pub id: String,
    pub source: String,
    pub scope: String,
    pub account_id: String,
    pub status: String,
    pub start_timestamp: i64,
    pub duration_ms: i64,
    pub deletion_mode: String,
    pub done: bool,
    pub ttl: i64,

    pub num_entities_uploaded: u64,
    pub num_streamed_entities_uploaded: u64,
    pub num_entities_to_delete: u64,
    pub num_entities_created: u64,
    pub num_entities_updated: u64,
    pub num_entities_deleted: u64,
    pub num_entity_create_errors: u64,
    pub num_entity_update_errors: u64,
    pub num_entity_delete_errors: u64,
    pub num_entity_raw_data_entries_uploaded: u64,
    pub num_entity_raw_data_entries_created: u64,
    pub num_entity_raw_data_entries_updated: u64,
    pub num_entity_raw_data_entries_deleted: u64,

    pub num_relationships_uploaded: u64,
    pub num_streamed_relationships_uploaded: u64,
    pub num_relationships_to_delete: u64,
    pub num_relationships_created: u64,
    pub num_relationships_updated: u64,
    pub num_relationships_deleted: u64,
    pub num_relationship_create_errors: u64,
    pub num_relationship_update_errors: u64,
    pub num_relationship_delete_errors: u64,
    pub num_relationship_raw_data_entries_uploaded: u64,
    pub num_relationship_raw_data_entries_created: u64,
    pub num_relationship_raw_data_entries_updated: u64,
    pub num_relationship_raw_data_entries_deleted: u64,
    pub num_relationship_raw_data_entry_create_errors: u64,
    pub num_relationship_raw_data_entry_update_errors: u64,
    pub num_relationship_raw_data_entry_delete_errors: u64,

    pub num_mapped_relationships_created: u64,
    pub num_mapped_relationships_updated: u64,
    pub num_mapped_relationships_deleted: u64,
    pub num_mapped_relationship_create_errors: u64,
    pub num_mapped_relationship_update_errors: u64,
    pub num_mapped_relationship_delete_errors: u64,

    pub num_mutations_submitted: u64,
    pub num_mutations_completed: u64,
}

impl SyncJob {
    /// Sum of every entity and relationship error counter.
    pub fn total_errors(&self) -> u64 {
        self.num_entity_create_errors
            + self.num_entity_update_errors
            + self.num_entity_delete_errors
            + self.num_relationship_create_errors
            + self.num_relationship_update_errors
            + self.num_relationship_delete_errors
            + self.num_relationship_raw_data_entry_create_errors
            + self.num_relationship_raw_data_entry_update_errors
            + self.num_relationship_raw_data_entry_delete_errors
            + self.num_mapped_relationship_create_errors
            + self.num_mapped_relationship_update_errors
            + self.num_mapped_relationship_delete_errors
    }
}

/// The `{"job": {...}}` envelope every synchronization endpoint returns.
#[derive(Debug, Deserialize)]
pub struct SyncJobEnvelope {
    pub job: SyncJob,
}

/// Resume record for a partially uploaded job.
///
/// Counts are records (not chunks) already accepted by the service, so a
/// resumed run skips exactly those and continues in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncProgress {
    pub job_id: String,
    pub entities_uploaded: usize,
    pub relationships_uploaded: usize,
    pub finalized: bool,
}

impl SyncProgress {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Self::default()
        }
    }
}
