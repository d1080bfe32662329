//! Centralized error types for the JupiterOne client.

use std::time::Duration;
use thiserror::Error;

/// Main error type for client operations.
#[derive(Error, Debug)]
pub enum J1Error {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("NetworkError: error at network level: {status}")]
    Network { status: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("GraphQL error: {}", .0.join("; "))]
    Graphql(Vec<String>),

    #[error("Response is missing field '{0}'")]
    MissingField(&'static str),

    #[error("Deferred query ended with status {0}")]
    QueryFailed(String),

    #[error("Deferred query did not finish after {attempts} polls ({elapsed:?})")]
    Timeout { attempts: u32, elapsed: Duration },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for client operations.
pub type J1Result<T> = Result<T, J1Error>;

impl J1Error {
    /// Create a network error from an HTTP status line.
    pub fn network(status: impl Into<String>) -> Self {
        Self::Network { status: status.into() }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error came from a body that did not match the expected shape.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::MissingField(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_carries_status_text() {
        let err = J1Error::network("502 Bad Gateway");
        assert_eq!(err.to_string(), "NetworkError: error at network level: 502 Bad Gateway");
    }

    #[test]
    fn test_graphql_error_joins_messages() {
        let err = J1Error::Graphql(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(err.to_string(), "GraphQL error: first; second");
    }

    #[test]
    fn test_decode_classification() {
        let json_err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        assert!(J1Error::from(json_err).is_decode());
        assert!(J1Error::MissingField("queryV1").is_decode());
        assert!(!J1Error::network("500").is_decode());
    }
}
