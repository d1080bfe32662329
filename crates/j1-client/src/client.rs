//! Shared client handle.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use j1_core::{Config, J1Error, J1Result};

use crate::audit::AuditService;
use crate::entity::EntityService;
use crate::integration::IntegrationService;
use crate::query::QueryService;
use crate::question::QuestionService;
use crate::relationship::RelationshipService;
use crate::rule::RuleService;
use crate::sync::SyncService;
use crate::transport::{GraphqlTransport, HttpTransport, ReqwestTransport};

/// Client for the JupiterOne APIs.
///
/// Cloning is cheap: every clone and every service shares the same
/// transports and base URL.
#[derive(Clone)]
pub struct Client {
    http: Arc<dyn HttpTransport>,
    graphql: Arc<dyn GraphqlTransport>,
    base_url: Arc<str>,
}

impl Client {
    /// Create a client backed by `reqwest`.
    pub fn new(config: &Config) -> J1Result<Self> {
        config.validate()?;
        let transport = Arc::new(ReqwestTransport::new(config)?);
        Ok(Self::with_transports(
            transport.clone(),
            transport,
            config.http_base_url(),
        ))
    }

    /// Create a client from `J1_API_TOKEN`, `J1_ACCOUNT` and `J1_REGION`.
    pub fn from_env() -> J1Result<Self> {
        Self::new(&Config::from_env()?)
    }

    /// Create a client over custom transports.
    pub fn with_transports(
        http: Arc<dyn HttpTransport>,
        graphql: Arc<dyn GraphqlTransport>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            graphql,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn synchronization(&self) -> SyncService {
        SyncService::new(self.clone())
    }

    pub fn query(&self) -> QueryService {
        QueryService::new(self.clone())
    }

    pub fn entities(&self) -> EntityService {
        EntityService::new(self.clone())
    }

    pub fn relationships(&self) -> RelationshipService {
        RelationshipService::new(self.clone())
    }

    pub fn questions(&self) -> QuestionService {
        QuestionService::new(self.clone())
    }

    pub fn rules(&self) -> RuleService {
        RuleService::new(self.clone())
    }

    pub fn integrations(&self) -> IntegrationService {
        IntegrationService::new(self.clone())
    }

    pub fn audit(&self) -> AuditService {
        AuditService::new(self.clone())
    }

    pub(crate) fn http(&self) -> &dyn HttpTransport {
        self.http.as_ref()
    }

    /// Run a GraphQL operation and decode one top-level field of `data`.
    pub(crate) async fn graphql_field<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        field: &'static str,
    ) -> J1Result<T> {
        let mut data = self.graphql.run(query, variables).await?;
        let value = data
            .get_mut(field)
            .map(Value::take)
            .ok_or(J1Error::MissingField(field))?;
        Ok(serde_json::from_value(value)?)
    }
}
