//! Saved question management.

use serde::Deserialize;
use serde_json::json;

use j1_core::domain::question::{Question, QuestionProperties};
use j1_core::J1Result;

use crate::Client;

const QUESTION_FIELDS: &str = r#"
    id
    title
    description
    queries {
      query
      version
      name
    }
    tags
    accountId
    integrationDefinitionId"#;

fn get_question_query() -> String {
    format!(
        r#"
query GetQuestionById($id: ID!) {{
  question(id: $id) {{{QUESTION_FIELDS}
  }}
}}"#
    )
}

fn create_question_mutation() -> String {
    format!(
        r#"
mutation CreateQuestion($question: CreateQuestionInput!) {{
  createQuestion(question: $question) {{{QUESTION_FIELDS}
  }}
}}"#
    )
}

fn update_question_mutation() -> String {
    format!(
        r#"
mutation UpdateQuestion($id: ID!, $update: QuestionUpdate!) {{
  updateQuestion(id: $id, update: $update) {{{QUESTION_FIELDS}
  }}
}}"#
    )
}

const DELETE_QUESTION: &str = r#"
mutation DeleteQuestion($id: ID!) {
  deleteQuestion(id: $id) {
    id
  }
}"#;

#[derive(Deserialize)]
struct DeletedQuestion {
    id: String,
}

/// CRUD for saved questions.
#[derive(Clone)]
pub struct QuestionService {
    client: Client,
}

impl QuestionService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> J1Result<Question> {
        self.client
            .graphql_field(&get_question_query(), json!({ "id": id }), "question")
            .await
    }

    pub async fn create(&self, properties: &QuestionProperties) -> J1Result<Question> {
        self.client
            .graphql_field(
                &create_question_mutation(),
                json!({ "question": properties }),
                "createQuestion",
            )
            .await
    }

    pub async fn update(&self, id: &str, properties: &QuestionProperties) -> J1Result<Question> {
        self.client
            .graphql_field(
                &update_question_mutation(),
                json!({ "id": id, "update": properties }),
                "updateQuestion",
            )
            .await
    }

    /// Delete a question, returning the deleted id.
    pub async fn delete(&self, id: &str) -> J1Result<String> {
        let deleted: DeletedQuestion = self
            .client
            .graphql_field(DELETE_QUESTION, json!({ "id": id }), "deleteQuestion")
            .await?;
        Ok(deleted.id)
    }
}
