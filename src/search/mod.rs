//! Search Module
//!
//! Web search exposed to the agent personas as their single tool:
//! - `SearchBackend` - one raw query against a search provider
//! - `SerpApiBackend` - DuckDuckGo results through SerpAPI
//! - `SearchTool` - the persona-facing wrapper that always answers with text

pub mod serpapi;
pub mod tool;

pub use serpapi::SerpApiBackend;
pub use tool::{format_results, SearchTool, TOOL_DESCRIPTION, TOOL_NAME};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("SerpAPI key not configured")]
    NoApiKey,

    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse search results: {0}")]
    ParseError(String),
}

/// One record returned by a search provider. Every field is optional; a
/// record carrying `error` stands for a provider-reported failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub title: Option<String>,
    pub href: Option<String>,
    pub body: Option<String>,
    pub error: Option<String>,
}

impl SearchRecord {
    pub fn new(title: impl Into<String>, href: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            href: Some(href.into()),
            body: Some(body.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one query, returning at most `max_results` records.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchRecord>, SearchError>;
}
