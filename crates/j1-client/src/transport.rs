//! HTTP and GraphQL transports.
//!
//! The coordinator and poller only talk to the [`HttpTransport`] and
//! [`GraphqlTransport`] traits. [`ReqwestTransport`] implements both against
//! the live service and attaches the account credentials.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use j1_core::{Config, J1Error, J1Result};

/// Header carrying the account id on every authenticated request.
pub const ACCOUNT_HEADER: &str = "JupiterOne-Account";

/// A single REST request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    /// Attach bearer token and account headers. Pre-signed result URLs must
    /// be fetched without them.
    pub authenticated: bool,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
            authenticated: true,
        }
    }

    pub fn post(url: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body,
            authenticated: true,
        }
    }

    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// URL safe to log. Unauthenticated requests go to pre-signed URLs whose
    /// query string carries the signature, so it is dropped.
    pub fn loggable_url(&self) -> &str {
        if self.authenticated {
            return &self.url;
        }
        self.url
            .split_once('?')
            .map_or(self.url.as_str(), |(base, _)| base)
    }
}

/// Status and raw body of a REST response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Turn a non-2xx status into a network error carrying the status text.
    pub fn error_for_status(self) -> J1Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(J1Error::network(self.status.to_string()))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> J1Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> J1Result<HttpResponse>;
}

#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    /// Execute an operation and return its `data` object.
    async fn run(&self, query: &str, variables: Value) -> J1Result<Value>;
}

#[derive(Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

#[derive(Deserialize)]
struct GraphqlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorMessage>>,
}

/// `reqwest`-backed transport for both REST and GraphQL calls.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    graphql_endpoint: String,
    bearer: HeaderValue,
    account: HeaderValue,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> J1Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| J1Error::config("API key contains invalid header characters"))?;
        let account = HeaderValue::from_str(&config.account_id)
            .map_err(|_| J1Error::config("account id contains invalid header characters"))?;

        Ok(Self {
            client,
            graphql_endpoint: config.graphql_endpoint(),
            bearer,
            account,
        })
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(AUTHORIZATION, self.bearer.clone())
            .header(ACCOUNT_HEADER, self.account.clone())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> J1Result<HttpResponse> {
        debug!(method = %request.method, url = %request.loggable_url(), "HTTP request");

        let mut builder = self.client.request(request.method, &request.url);
        if request.authenticated {
            builder = self
                .authorize(builder)
                .header(CONTENT_TYPE, "application/json");
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl GraphqlTransport for ReqwestTransport {
    async fn run(&self, query: &str, variables: Value) -> J1Result<Value> {
        let response = self
            .authorize(self.client.post(&self.graphql_endpoint))
            .header(CACHE_CONTROL, "no-cache")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = %status, bytes = body.len(), "GraphQL response");

        let envelope: GraphqlEnvelope = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => return Err(J1Error::network(status.to_string())),
            Err(e) => return Err(e.into()),
        };

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            return Err(J1Error::Graphql(errors.into_iter().map(|e| e.message).collect()));
        }
        if !status.is_success() {
            return Err(J1Error::network(status.to_string()));
        }

        envelope.data.ok_or(J1Error::MissingField("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status_keeps_status_text() {
        let err = HttpResponse::new(StatusCode::BAD_GATEWAY, Vec::new())
            .error_for_status()
            .unwrap_err();
        assert!(matches!(err, J1Error::Network { ref status } if status == "502 Bad Gateway"));
    }

    #[test]
    fn test_created_is_success() {
        let response = HttpResponse::new(StatusCode::CREATED, b"{}".to_vec());
        assert!(response.error_for_status().is_ok());
    }

    #[test]
    fn test_json_decode_error() {
        let response = HttpResponse::new(StatusCode::OK, b"not json".to_vec());
        assert!(response.json::<Value>().unwrap_err().is_decode());
    }

    #[test]
    fn test_new_rejects_bad_header_values() {
        let config = Config::new("token\n", "acct");
        assert!(matches!(ReqwestTransport::new(&config), Err(J1Error::Config(_))));
    }

    #[test]
    fn test_presigned_signature_is_not_logged() {
        let url = "https://results.example/q1.json?X-Amz-Signature=abc&X-Amz-Expires=300";
        assert_eq!(
            HttpRequest::get(url).unauthenticated().loggable_url(),
            "https://results.example/q1.json"
        );
        assert_eq!(HttpRequest::get(url).loggable_url(), url);
        assert_eq!(
            HttpRequest::get("https://results.example/q1").unauthenticated().loggable_url(),
            "https://results.example/q1"
        );
    }
}
