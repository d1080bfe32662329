//! Account audit events.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PageInfo;

/// A single audit event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditEvent {
    pub id: String,
    pub resource_type: String,
    pub resource_id: String,
    pub category: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub performed_by_user_id: Option<String>,
    pub data: Value,
}

impl AuditEvent {
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventPage {
    pub items: Vec<AuditEvent>,
    #[serde(default)]
    pub page_info: PageInfo,
}
