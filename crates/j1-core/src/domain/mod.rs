//! Domain models exchanged with the JupiterOne APIs.

pub mod audit;
pub mod graph;
pub mod integration;
pub mod query;
pub mod question;
pub mod rule;
pub mod sync;

use serde::{Deserialize, Serialize};

/// Cursor pagination info shared by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor for the next request, if there is another page.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }
}
