//! Account audit events.

use serde_json::{json, Map, Value};

use j1_core::domain::audit::AuditEventPage;
use j1_core::J1Result;

use crate::Client;

const LIST_AUDIT_EVENTS: &str = r#"
query GetAuditEventsForAccount($limit: Int, $cursor: String) {
  getAuditEventsForAccount(limit: $limit, cursor: $cursor) {
    items {
      id
      resourceType
      resourceId
      category
      timestamp
      performedByUserId
      data
    }
    pageInfo {
      endCursor
      hasNextPage
    }
  }
}"#;

#[derive(Clone)]
pub struct AuditService {
    client: Client,
}

impl AuditService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// List audit events. A `limit` of 0 and an empty cursor use the API defaults.
    pub async fn list_events(&self, limit: u32, cursor: &str) -> J1Result<AuditEventPage> {
        let mut variables = Map::new();
        if limit != 0 {
            variables.insert("limit".to_string(), json!(limit));
        }
        if !cursor.is_empty() {
            variables.insert("cursor".to_string(), json!(cursor));
        }
        self.client
            .graphql_field(
                LIST_AUDIT_EVENTS,
                Value::Object(variables),
                "getAuditEventsForAccount",
            )
            .await
    }
}
