//! Client configuration.
//!
//! Credentials and region come from the caller or from the
//! `J1_API_TOKEN`, `J1_ACCOUNT`, `J1_REGION` and `J1_BASE_URL`
//! environment variables.

use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::{J1Error, J1Result};

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us";

/// Per-request timeout applied by the HTTP layer.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for connecting to JupiterOne.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub account_id: String,
    #[serde(default)]
    pub region: Option<String>,
    /// Replaces `https://api.<region>.jupiterone.io` entirely.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

impl Config {
    /// Create a config for the default region.
    pub fn new(api_key: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            account_id: account_id.into(),
            region: None,
            base_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Read the configuration from the environment.
    pub fn from_env() -> J1Result<Self> {
        let api_key = std::env::var("J1_API_TOKEN")
            .map_err(|_| J1Error::config("J1_API_TOKEN is not set"))?;
        let account_id = std::env::var("J1_ACCOUNT")
            .map_err(|_| J1Error::config("J1_ACCOUNT is not set"))?;

        let mut config = Self::new(api_key, account_id);
        config.region = std::env::var("J1_REGION").ok().filter(|r| !r.is_empty());
        config.base_url = std::env::var("J1_BASE_URL").ok().filter(|u| !u.is_empty());
        Ok(config)
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Region in use, falling back to [`DEFAULT_REGION`].
    pub fn region(&self) -> &str {
        match self.region.as_deref() {
            Some(region) if !region.is_empty() => region,
            _ => DEFAULT_REGION,
        }
    }

    /// Base URL for REST calls, without a trailing slash.
    pub fn http_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://api.{}.jupiterone.io", self.region()),
        }
    }

    /// GraphQL endpoint.
    pub fn graphql_endpoint(&self) -> String {
        format!("{}/graphql", self.http_base_url())
    }

    /// Reject configurations that cannot authenticate.
    pub fn validate(&self) -> J1Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(J1Error::config("API key must not be empty"));
        }
        if self.account_id.trim().is_empty() {
            return Err(J1Error::config("account id must not be empty"));
        }
        info!(region = self.region(), "Utilizing region");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_endpoint_defaults_to_us() {
        let config = Config::new("token", "acct");
        assert_eq!(config.graphql_endpoint(), "https://api.us.jupiterone.io/graphql");
        assert_eq!(config.http_base_url(), "https://api.us.jupiterone.io");
    }

    #[test]
    fn test_graphql_endpoint_uses_region() {
        let config = Config::new("token", "acct").with_region("dev");
        assert_eq!(config.graphql_endpoint(), "https://api.dev.jupiterone.io/graphql");
    }

    #[test]
    fn test_empty_region_falls_back() {
        let config = Config::new("token", "acct").with_region("");
        assert_eq!(config.region(), "us");
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let config = Config::new("token", "acct").with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.http_base_url(), "http://127.0.0.1:8080");
        assert_eq!(config.graphql_endpoint(), "http://127.0.0.1:8080/graphql");
    }

    #[test]
    fn test_validate_rejects_missing_credentials() {
        assert!(Config::new("", "acct").validate().is_err());
        assert!(Config::new("token", " ").validate().is_err());
        assert!(Config::new("token", "acct").validate().is_ok());
    }
}
