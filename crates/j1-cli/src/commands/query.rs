//! Deferred query command.

use std::time::Duration;

use anyhow::Result;
use clap::{Args, ValueEnum};

use j1_client::j1_core::domain::query::QueryInput;
use j1_client::{Client, PollPolicy};

use crate::output;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    /// Print the result document as JSON
    Raw,
    /// Decode as a list of vertices
    List,
    /// Decode as a vertex/edge tree
    Tree,
    /// Decode by the declared result type
    Auto,
}

#[derive(Args)]
pub struct QueryArgs {
    /// J1QL query string
    pub query: String,

    /// Cursor from a previous page
    #[arg(long)]
    pub cursor: Option<String>,

    /// How to decode the result
    #[arg(long, value_enum, default_value = "auto")]
    pub shape: Shape,

    /// Give up after this many seconds (0 waits indefinitely)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Give up after this many status polls (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_polls: Option<u32>,
}

impl QueryArgs {
    fn poll_policy(&self) -> PollPolicy {
        let mut policy = PollPolicy::default();
        match self.timeout {
            Some(0) => policy.timeout = None,
            Some(secs) => policy = policy.with_timeout(Duration::from_secs(secs)),
            None => {}
        }
        if let Some(max) = self.max_polls {
            policy = policy.with_max_attempts(max);
        }
        policy
    }
}

pub async fn execute(args: QueryArgs, client: &Client) -> Result<()> {
    let queries = client.query().with_poll_policy(args.poll_policy());

    let mut input = QueryInput::new(args.query.as_str());
    if let Some(cursor) = &args.cursor {
        input = input.with_cursor(cursor.as_str());
    }

    let raw = queries.query(input).await?;

    match args.shape {
        Shape::Raw => println!("{}", serde_json::to_string_pretty(&raw)?),
        Shape::List => output::print_vertices(&queries.as_list(&raw)?.data),
        Shape::Tree => output::print_tree(&queries.as_tree(&raw)?.data),
        Shape::Auto => output::print_query_result(&queries.classify(&raw)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(timeout: Option<u64>, max_polls: Option<u32>) -> QueryArgs {
        QueryArgs {
            query: "FIND Host".to_string(),
            cursor: None,
            shape: Shape::Auto,
            timeout,
            max_polls,
        }
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(args(None, None).poll_policy(), PollPolicy::default());
    }

    #[test]
    fn test_zero_timeout_waits_indefinitely() {
        let policy = args(Some(0), Some(10)).poll_policy();
        assert_eq!(policy.timeout, None);
        assert_eq!(policy.max_attempts, Some(10));
    }

    #[test]
    fn test_timeout_in_seconds() {
        let policy = args(Some(30), None).poll_policy();
        assert_eq!(policy.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_max_polls_must_be_positive() {
        use crate::commands::Cli;
        use clap::Parser;

        let parse = |max: &str| Cli::try_parse_from(["j1", "query", "FIND Host", "--max-polls", max]);
        assert!(parse("0").is_err());
        assert!(parse("1").is_ok());
    }
}
