//! Question rule instances.

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use j1_core::domain::rule::{
    BaseQuestionRuleInstanceProperties, QuestionRuleInstance, UpdateQuestionRuleInstanceProperties,
};
use j1_core::J1Result;

use crate::Client;

const RULE_FIELDS: &str = r#"
    id
    name
    description
    version
    specVersion
    latest
    pollingInterval
    deleted
    accountId
    type
    templates
    question {
      queries {
        name
        query
        version
      }
    }
    operations {
      when
      actions
    }
    outputs"#;

fn get_rule_query() -> String {
    format!(
        r#"
query GetQuestionRuleInstance($id: ID!) {{
  questionRuleInstance(id: $id) {{{RULE_FIELDS}
  }}
}}"#
    )
}

fn create_rule_mutation() -> String {
    format!(
        r#"
mutation CreateQuestionRuleInstance($instance: CreateQuestionRuleInstanceInput!) {{
  createQuestionRuleInstance(instance: $instance) {{{RULE_FIELDS}
  }}
}}"#
    )
}

fn update_rule_mutation() -> String {
    format!(
        r#"
mutation UpdateQuestionRuleInstance($instance: UpdateQuestionRuleInstanceInput!) {{
  updateQuestionRuleInstance(instance: $instance) {{{RULE_FIELDS}
  }}
}}"#
    )
}

const DELETE_RULE: &str = r#"
mutation DeleteRuleInstance($id: ID!) {
  deleteRuleInstance(id: $id) {
    id
  }
}"#;

#[derive(Deserialize)]
struct DeletedRule {
    id: String,
}

/// CRUD for question rule instances.
#[derive(Clone)]
pub struct RuleService {
    client: Client,
}

impl RuleService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> J1Result<QuestionRuleInstance> {
        self.client
            .graphql_field(&get_rule_query(), json!({ "id": id }), "questionRuleInstance")
            .await
    }

    pub async fn create(
        &self,
        properties: &BaseQuestionRuleInstanceProperties,
    ) -> J1Result<QuestionRuleInstance> {
        info!(name = %properties.name, "Creating question rule instance");
        self.client
            .graphql_field(
                &create_rule_mutation(),
                json!({ "instance": properties }),
                "createQuestionRuleInstance",
            )
            .await
    }

    pub async fn update(
        &self,
        update: &UpdateQuestionRuleInstanceProperties,
    ) -> J1Result<QuestionRuleInstance> {
        info!(id = %update.id, name = %update.properties.name, "Updating question rule instance");
        self.client
            .graphql_field(
                &update_rule_mutation(),
                json!({ "instance": update }),
                "updateQuestionRuleInstance",
            )
            .await
    }

    /// Delete a rule, returning the deleted id.
    pub async fn delete(&self, id: &str) -> J1Result<String> {
        let deleted: DeletedRule = self
            .client
            .graphql_field(DELETE_RULE, json!({ "id": id }), "deleteRuleInstance")
            .await?;
        Ok(deleted.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedGraphql, ScriptedHttp};
    use j1_core::domain::rule::RuleOperation;
    use std::sync::Arc;

    fn client(graphql: Arc<ScriptedGraphql>) -> Client {
        Client::with_transports(Arc::new(ScriptedHttp::default()), graphql, "http://j1")
    }

    fn stored_rule(field: &str, name: &str, version: i64) -> serde_json::Value {
        let mut data = serde_json::Map::new();
        data.insert(
            field.to_string(),
            json!({
                "id": "rule-1",
                "name": name,
                "version": version,
                "latest": true,
                "type": "QUESTION",
                "pollingInterval": "ONE_DAY",
                "operations": [{"when": {"type": "FILTER"}, "actions": [{"type": "SET_PROPERTY"}]}]
            }),
        );
        serde_json::Value::Object(data)
    }

    #[tokio::test]
    async fn test_create_wraps_properties_as_instance() {
        let graphql = Arc::new(ScriptedGraphql::replying(stored_rule(
            "createQuestionRuleInstance",
            "Open ports",
            1,
        )));
        let properties = BaseQuestionRuleInstanceProperties {
            name: "Open ports".to_string(),
            spec_version: 1,
            polling_interval: "ONE_DAY".to_string(),
            operations: vec![RuleOperation {
                when: json!({"type": "FILTER"}),
                actions: vec![json!({"type": "SET_PROPERTY"})],
            }],
            ..Default::default()
        };
        let rule = client(graphql.clone()).rules().create(&properties).await.unwrap();

        assert_eq!(rule.id, "rule-1");
        assert_eq!(rule.properties.operations.len(), 1);
        let (query, vars) = graphql.calls().pop().unwrap();
        assert!(query.contains("createQuestionRuleInstance(instance: $instance)"));
        assert_eq!(vars["instance"]["name"], "Open ports");
        assert_eq!(vars["instance"]["operations"][0]["when"]["type"], "FILTER");
    }

    #[tokio::test]
    async fn test_get_update_and_delete() {
        let graphql = Arc::new(ScriptedGraphql::new(|query, vars| {
            if query.contains("deleteRuleInstance") {
                Ok(json!({"deleteRuleInstance": {"id": vars["id"].clone()}}))
            } else if query.contains("updateQuestionRuleInstance") {
                Ok(stored_rule("updateQuestionRuleInstance", "Renamed", 2))
            } else {
                Ok(stored_rule("questionRuleInstance", "Open ports", 1))
            }
        }));
        let rules = client(graphql.clone()).rules();

        let mut rule = rules.get("rule-1").await.unwrap();
        assert_eq!(graphql.last_variables(), json!({"id": "rule-1"}));
        assert_eq!(rule.version, 1);

        rule.properties.name = "Renamed".to_string();
        let updated = rules
            .update(&UpdateQuestionRuleInstanceProperties {
                id: rule.id.clone(),
                version: rule.version,
                properties: rule.properties.clone(),
            })
            .await
            .unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(updated.properties.name, "Renamed");
        let vars = graphql.last_variables();
        assert_eq!(vars["instance"]["id"], "rule-1");
        assert_eq!(vars["instance"]["version"], 1);
        assert_eq!(vars["instance"]["name"], "Renamed");

        assert_eq!(rules.delete("rule-1").await.unwrap(), "rule-1");
    }
}
