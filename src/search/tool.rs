//! The search capability handed to every persona.
//!
//! `SearchTool::search` never fails: provider errors come back as text so
//! the runtime can pass them to the model like any other tool output.

use super::{SearchBackend, SearchRecord, SerpApiBackend};
use crate::config::{SearchConfig, DEFAULT_SEARCH_RESULTS};
use std::sync::Arc;
use tracing::warn;

pub const TOOL_NAME: &str = "duckduckgo_search";
pub const TOOL_DESCRIPTION: &str = "Search the web for information using DuckDuckGo";

const NO_RESULTS: &str = "No results found.";

#[derive(Clone)]
pub struct SearchTool {
    backend: Arc<dyn SearchBackend>,
    max_results: usize,
}

impl SearchTool {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            max_results: DEFAULT_SEARCH_RESULTS,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(Arc::new(SerpApiBackend::from_config(config))).with_max_results(config.max_results)
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    pub fn name(&self) -> &'static str {
        TOOL_NAME
    }

    pub fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    pub async fn search(&self, query: &str) -> String {
        match self.backend.search(query, self.max_results).await {
            Ok(records) => format_results(&records),
            Err(e) => {
                warn!(error = %e, query = %query, "Search failed");
                format!("Error performing search: {}", e)
            }
        }
    }
}

/// Render records as a 1-indexed listing, three lines per entry.
pub fn format_results(records: &[SearchRecord]) -> String {
    let first = match records.first() {
        Some(first) => first,
        None => return NO_RESULTS.to_string(),
    };
    if let Some(error) = &first.error {
        return error.clone();
    }

    let mut formatted = String::new();
    for (i, record) in records.iter().enumerate() {
        formatted.push_str(&format!(
            "{}. {}\n",
            i + 1,
            record.title.as_deref().unwrap_or("No title")
        ));
        formatted.push_str(&format!(
            "   Link: {}\n",
            record.href.as_deref().unwrap_or("No link")
        ));
        formatted.push_str(&format!(
            "   {}\n\n",
            record.body.as_deref().unwrap_or("No snippet")
        ));
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    enum Reply {
        Records(Vec<SearchRecord>),
        Fail,
    }

    struct FakeBackend {
        reply: Reply,
        seen: Mutex<Vec<(String, usize)>>,
    }

    impl FakeBackend {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SearchBackend for FakeBackend {
        async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchRecord>, SearchError> {
            self.seen.lock().unwrap().push((query.to_string(), max_results));
            match &self.reply {
                Reply::Records(records) => Ok(records.clone()),
                Reply::Fail => Err(SearchError::RequestFailed("connection reset".to_string())),
            }
        }
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(format_results(&[]), "No results found.");
    }

    #[test]
    fn test_two_results_are_numbered() {
        let records = vec![
            SearchRecord::new("Senso-ji", "https://example.com/sensoji", "Oldest temple in Tokyo"),
            SearchRecord::new("Tsukiji", "https://example.com/tsukiji", "Outer market food stalls"),
        ];

        let text = format_results(&records);
        let entries: Vec<&str> = text.trim_end().split("\n\n").collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].starts_with("1. Senso-ji"));
        assert!(entries[1].starts_with("2. Tsukiji"));
        for entry in entries {
            let lines: Vec<&str> = entry.lines().collect();
            assert_eq!(lines.len(), 3);
            assert!(lines.iter().all(|l| !l.trim().is_empty()));
            assert!(lines[1].trim_start().starts_with("Link: "));
        }
    }

    #[test]
    fn test_missing_fields_use_fallbacks() {
        let text = format_results(&[SearchRecord::default()]);
        assert_eq!(text, "1. No title\n   Link: No link\n   No snippet\n\n");
    }

    #[test]
    fn test_error_record_returned_verbatim() {
        let records = vec![
            SearchRecord::error("Rate limit exceeded"),
            SearchRecord::new("ignored", "https://example.com", "ignored"),
        ];
        assert_eq!(format_results(&records), "Rate limit exceeded");
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_text() {
        let tool = SearchTool::new(FakeBackend::new(Reply::Fail));
        let text = tool.search("tokyo").await;
        assert_eq!(text, "Error performing search: Search request failed: connection reset");
    }

    #[tokio::test]
    async fn test_requests_top_five() {
        let backend = FakeBackend::new(Reply::Records(vec![]));
        let tool = SearchTool::new(backend.clone());

        assert_eq!(tool.search("osaka street food").await, "No results found.");
        assert_eq!(
            backend.seen.lock().unwrap().as_slice(),
            &[("osaka street food".to_string(), 5)]
        );
        assert_eq!(tool.name(), "duckduckgo_search");
    }
}
