//! JupiterOne client core
//!
//! Configuration, error types and the domain models shared by the
//! client library and the command-line tool.

pub mod config;
pub mod domain;
pub mod error;

pub use config::{Config, DEFAULT_REGION};
pub use error::{J1Error, J1Result};
