//! Saved questions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionQuery {
    pub query: String,
    pub version: Option<String>,
    pub name: Option<String>,
}

/// Compliance mapping attached to a question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionCompliance {
    pub standard: Option<String>,
    pub requirements: Vec<String>,
    pub controls: Vec<String>,
}

/// Input for creating or updating a question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionProperties {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub queries: Vec<QuestionQuery>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub compliance: Vec<QuestionCompliance>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub queries: Vec<QuestionQuery>,
    pub account_id: Option<String>,
    pub integration_definition_id: Option<String>,
}
