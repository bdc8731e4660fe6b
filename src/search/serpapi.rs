//! SerpAPI Client
//!
//! Runs web searches through SerpAPI's JSON endpoint. The default engine is
//! `duckduckgo`; any SerpAPI engine that returns `organic_results` with
//! `title`/`link`/`snippet` works.
//!
//! A top-level `error` string in a 2xx response is surfaced as a single
//! error record so the tool can hand the provider's message back verbatim.
//! Non-2xx responses are request failures.

use super::{SearchBackend, SearchError, SearchRecord};
use crate::config::SearchConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Phrase SerpAPI uses when a query simply matched nothing.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

pub struct SerpApiBackend {
    client: Client,
    api_key: Option<String>,
    engine: String,
    api_base: String,
}

impl SerpApiBackend {
    pub fn new(api_key: Option<String>) -> Self {
        let defaults = SearchConfig::default();
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            engine: defaults.engine,
            api_base: defaults.api_base,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.serpapi_key.clone())
            .with_engine(&config.engine)
            .with_api_base(&config.api_base)
    }

    pub fn with_engine(mut self, engine: &str) -> Self {
        self.engine = engine.to_string();
        self
    }

    /// Point the client at another host (used by tests)
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    fn parse_response(body: &Value, max_results: usize) -> Result<Vec<SearchRecord>, SearchError> {
        if let Some(message) = body.get("error").and_then(|v| v.as_str()) {
            if message.contains(NO_RESULTS_MARKER) {
                return Ok(Vec::new());
            }
            return Ok(vec![SearchRecord::error(message)]);
        }

        let organic_results = match body.get("organic_results") {
            Some(results) => results,
            None => return Ok(Vec::new()),
        };

        let results_array = organic_results
            .as_array()
            .ok_or_else(|| SearchError::ParseError("Expected array of results".to_string()))?;

        let text = |result: &Value, key: &str| {
            result.get(key).and_then(|v| v.as_str()).map(String::from)
        };

        Ok(results_array
            .iter()
            .take(max_results)
            .map(|result| SearchRecord {
                title: text(result, "title"),
                href: text(result, "link"),
                body: text(result, "snippet"),
                error: None,
            })
            .collect())
    }
}

#[async_trait]
impl SearchBackend for SerpApiBackend {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchRecord>, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::NoApiKey)?;

        info!(query = %query, engine = %self.engine, "Searching via SerpAPI");

        let url = format!("{}/search.json", self.api_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("engine", self.engine.as_str()),
                ("q", query),
                ("api_key", api_key),
            ])
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        // Quota and auth failures arrive as non-2xx with an `error` field
        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or_else(|| format!("HTTP {}", status));
            warn!(status = %status, error = %message, "SerpAPI returned an error status");
            return Err(SearchError::RequestFailed(message));
        }

        debug!("Raw SerpAPI response received");

        let records = Self::parse_response(&body, max_results)?;
        info!(count = records.len(), "Search completed");
        Ok(records)
    }
}
