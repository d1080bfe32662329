//! # JupiterOne client
//!
//! Async access to the JupiterOne graph APIs.
//!
//! Provides bulk synchronization jobs with chunked, resumable uploads,
//! deferred J1QL queries with bounded polling, and thin wrappers over the
//! entity, relationship, question, rule, integration and audit GraphQL operations.

pub mod audit;
pub mod client;
pub mod entity;
pub mod integration;
pub mod query;
pub mod question;
pub mod relationship;
pub mod rule;
pub mod sync;
pub mod transport;

#[cfg(test)]
mod testing;

pub use audit::AuditService;
pub use client::Client;
pub use entity::EntityService;
pub use integration::IntegrationService;
pub use query::{PollPolicy, QueryService};
pub use question::QuestionService;
pub use relationship::RelationshipService;
pub use rule::RuleService;
pub use sync::{SyncRun, SyncService, DEFAULT_CHUNK_SIZE};
pub use transport::{GraphqlTransport, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

pub use j1_core;
