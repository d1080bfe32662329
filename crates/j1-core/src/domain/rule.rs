//! Question rule instances (alert rules driven by saved queries).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::question::QuestionQuery;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleQuestion {
    pub queries: Vec<QuestionQuery>,
}

/// A condition and the actions run when it matches. Both stay opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOperation {
    pub when: Value,
    pub actions: Vec<Value>,
}

/// Properties shared by rule creation, update and the stored rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseQuestionRuleInstanceProperties {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub spec_version: i64,
    /// e.g. `ONE_DAY`, `THIRTY_MINUTES`.
    pub polling_interval: String,
    pub outputs: Vec<String>,
    pub operations: Vec<RuleOperation>,
    pub question: RuleQuestion,
    pub templates: Map<String, Value>,
}

/// Input for updating a rule; `version` must match the stored version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateQuestionRuleInstanceProperties {
    pub id: String,
    pub version: i64,
    #[serde(flatten)]
    pub properties: BaseQuestionRuleInstanceProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRuleInstance {
    pub id: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub latest: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(rename = "type", default)]
    pub rule_type: String,
    #[serde(flatten)]
    pub properties: BaseQuestionRuleInstanceProperties,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_instance_decodes_flattened_properties() {
        let rule: QuestionRuleInstance = serde_json::from_value(json!({
            "id": "rule-1",
            "accountId": "acct",
            "version": 3,
            "latest": true,
            "deleted": false,
            "type": "QUESTION",
            "name": "Open ports",
            "specVersion": 1,
            "pollingInterval": "ONE_DAY",
            "outputs": ["alertLevel"],
            "templates": {},
            "question": {"queries": [{"name": "query0", "query": "FIND Host", "version": "v1"}]},
            "operations": [{
                "when": {"type": "FILTER", "condition": ["AND", ["queries.query0.total", ">", 0]]},
                "actions": [{"type": "SET_PROPERTY", "targetProperty": "alertLevel", "targetValue": "HIGH"}]
            }]
        }))
        .unwrap();

        assert_eq!(rule.rule_type, "QUESTION");
        assert_eq!(rule.properties.name, "Open ports");
        assert_eq!(rule.properties.question.queries[0].query, "FIND Host");
        assert_eq!(rule.properties.operations[0].actions[0]["targetValue"], "HIGH");
    }

    #[test]
    fn test_update_input_serializes_id_and_version_alongside_properties() {
        let update = UpdateQuestionRuleInstanceProperties {
            id: "rule-1".to_string(),
            version: 3,
            properties: BaseQuestionRuleInstanceProperties {
                name: "Renamed".to_string(),
                polling_interval: "ONE_DAY".to_string(),
                ..Default::default()
            },
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["id"], "rule-1");
        assert_eq!(value["version"], 3);
        assert_eq!(value["name"], "Renamed");
        assert_eq!(value["pollingInterval"], "ONE_DAY");
        assert!(value.get("description").is_none());
    }
}
