//! Google Custom Search client
//!
//! Thin client over the [Custom Search JSON API]. A query plus the
//! configured engine ID (`cx`) returns up to 10 organic results per
//! request, which is the API's hard page-size cap.
//!
//! [Custom Search JSON API]: https://developers.google.com/custom-search/v1/overview

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

const GOOGLE_API_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Search API returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Failed to parse search results: {0}")]
    ParseError(String),
}

/// One organic search result
#[derive(Debug, Clone, serde::Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    items: Option<Vec<CseItem>>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

pub struct GoogleSearchClient {
    client: reqwest::Client,
    api_key: String,
    cse_id: String,
    base_url: String,
}

impl GoogleSearchClient {
    pub fn new(client: reqwest::Client, api_key: String, cse_id: String) -> Self {
        Self {
            client,
            api_key,
            cse_id,
            base_url: GOOGLE_API_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint. Used by tests with a
    /// mock server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Run a search and return the organic results.
    ///
    /// A response without an `items` array (no matches for the query) is
    /// an empty result list, not an error. Items without a link are
    /// dropped.
    pub async fn search(
        &self,
        query: &str,
        num: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let num = num.min(10);
        info!(query = %query, num, "Searching Google Custom Search");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("num", &num.to_string()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus(status.as_u16()));
        }

        let parsed: CseResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        debug!("Raw search response parsed");

        let results: Vec<SearchResult> = parsed
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| {
                let link = item.link?;
                Some(SearchResult {
                    title: item.title.unwrap_or_else(|| "Untitled".to_string()),
                    link,
                    snippet: item.snippet.unwrap_or_default(),
                })
            })
            .collect();

        info!(count = results.len(), "Search completed");
        Ok(results)
    }
}
