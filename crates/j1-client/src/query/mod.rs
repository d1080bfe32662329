//! Deferred J1QL queries.
//!
//! The query is submitted over GraphQL with deferral forced, which yields a
//! result URL. That URL is polled until the service reports `FINISHED` and the
//! final document is fetched as opaque JSON. Callers then reinterpret it with
//! [`QueryService::as_list`], [`QueryService::as_tree`] or
//! [`QueryService::classify`].

pub mod poll;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use j1_core::domain::query::{
    QueryDataTree, QueryDataVertex, QueryInput, QueryResult, TypedQueryResult,
};
use j1_core::{J1Error, J1Result};

use crate::transport::HttpRequest;
use crate::Client;

pub use poll::{poll_until_finished, PollPolicy};

const QUERY_V1: &str = r#"
query J1QL(
  $query: String!
  $variables: JSON
  $cursor: String
  $includeDeleted: Boolean
  $deferredResponse: DeferredResponseOption
  $deferredFormat: DeferredResponseFormat
  $flags: QueryV1Flags
  $dryRun: Boolean
  $remember: Boolean
) {
  queryV1(
    query: $query
    variables: $variables
    cursor: $cursor
    includeDeleted: $includeDeleted
    deferredResponse: $deferredResponse
    deferredFormat: $deferredFormat
    flags: $flags
    dryRun: $dryRun
    remember: $remember
  ) {
    type
    data
    url
  }
}"#;

#[derive(Deserialize)]
struct QueryV1 {
    #[serde(default)]
    url: Option<String>,
}

/// Deferred query API.
#[derive(Clone)]
pub struct QueryService {
    client: Client,
    policy: PollPolicy,
}

impl QueryService {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            policy: PollPolicy::default(),
        }
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn poll_policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Submit a query, wait for it to finish and return the raw result body.
    pub async fn query(&self, input: QueryInput) -> J1Result<Value> {
        let input = input.with_defaults();
        let submitted: QueryV1 = self
            .client
            .graphql_field(QUERY_V1, input.to_variables()?, "queryV1")
            .await?;
        let url = submitted.url.ok_or(J1Error::MissingField("queryV1.url"))?;

        let finished = poll_until_finished(self.client.http(), &url, &self.policy).await?;

        let results: Value = self
            .client
            .http()
            .send(HttpRequest::get(&finished.url).unauthenticated())
            .await?
            .error_for_status()?
            .json()?;

        info!(query = %input.query, "Deferred query results retrieved");
        Ok(results)
    }

    /// Submit a query and decode it by its declared result type.
    pub async fn query_typed(&self, input: QueryInput) -> J1Result<TypedQueryResult> {
        let raw = self.query(input).await?;
        self.classify(&raw)
    }

    /// Reinterpret a result as a list of vertices.
    pub fn as_list(&self, raw: &Value) -> J1Result<QueryResult<Vec<QueryDataVertex>>> {
        QueryResult::from_value(raw)
    }

    /// Reinterpret a result as a vertex/edge tree.
    pub fn as_tree(&self, raw: &Value) -> J1Result<QueryResult<QueryDataTree>> {
        QueryResult::from_value(raw)
    }

    pub fn classify(&self, raw: &Value) -> J1Result<TypedQueryResult> {
        TypedQueryResult::from_value(raw)
    }
}
