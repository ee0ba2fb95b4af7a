//! Research Agent
//!
//! Runs the search-and-summarize pipeline for one query:
//!
//! 1. Search the web for the query.
//! 2. Fetch each result page and extract readable text.
//! 3. Summarize each extracted page with the LLM.
//!
//! Per-page failures are logged and skipped; the pipeline keeps going
//! until it has enough summaries or runs out of sources.

use tracing::{error, info, warn};

use crate::config::Config;
use crate::extract::{extract_page, PageFetcher};
use crate::llm::{GeminiClient, Summarizer, SummaryContext};
use crate::models::SourceSummary;
use crate::search::GoogleSearchClient;

/// Results requested from the search API (its per-request maximum).
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Stop once this many sources have been summarized.
pub const MAX_SUMMARIES: usize = 6;

pub struct ResearchAgent {
    search: GoogleSearchClient,
    fetcher: PageFetcher,
    summarizer: Box<dyn Summarizer>,
}

/// What one pipeline run produced.
///
/// `sources_found` and `summaries` are reported separately so callers
/// can tell "no sources at all" apart from "sources found, none usable".
#[derive(Debug, Default)]
pub struct ResearchOutcome {
    pub sources_found: usize,
    pub summaries: Vec<SourceSummary>,
}

impl ResearchAgent {
    pub fn new(
        search: GoogleSearchClient,
        fetcher: PageFetcher,
        summarizer: Box<dyn Summarizer>,
    ) -> Self {
        Self {
            search,
            fetcher,
            summarizer,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let http = reqwest::Client::new();
        let search = GoogleSearchClient::new(
            http.clone(),
            config.search.google_api_key.clone(),
            config.search.google_cse_id.clone(),
        );
        let summarizer = GeminiClient::new(
            http,
            config.llm.gemini_api_key.clone(),
            config.llm.model.clone(),
        );
        Self::new(search, PageFetcher::new(), Box::new(summarizer))
    }

    pub async fn research(&self, query: &str) -> ResearchOutcome {
        // A failed search degrades to an empty result list; the route
        // turns that into the no-results response.
        let results = match self.search.search(query, MAX_SEARCH_RESULTS).await {
            Ok(results) => results,
            Err(e) => {
                warn!(query = %query, error = %e, "Search failed");
                Vec::new()
            }
        };

        let mut outcome = ResearchOutcome {
            sources_found: results.len(),
            summaries: Vec::new(),
        };

        for result in results {
            if outcome.summaries.len() >= MAX_SUMMARIES {
                break;
            }

            let html = match self.fetcher.fetch_html(&result.link).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(url = %result.link, error = %e, "Fetch failed");
                    continue;
                }
            };

            let Some(page) = extract_page(&result.link, &html) else {
                continue;
            };

            let context = SummaryContext {
                title: page.title.clone(),
                url: result.link.clone(),
                date_iso: page.published.map(|date| date.to_rfc3339()),
            };

            let summary = match self.summarizer.summarize(&page.text, &context).await {
                Ok(summary) => summary,
                Err(e) => {
                    error!(url = %result.link, error = %e, "Summarization failed");
                    continue;
                }
            };

            let title = page
                .title
                .or_else(|| non_empty(result.title))
                .unwrap_or_else(|| "Untitled".to_string());

            outcome.summaries.push(SourceSummary {
                title,
                url: result.link,
                summary,
            });
        }

        info!(
            query = %query,
            sources = outcome.sources_found,
            summaries = outcome.summaries.len(),
            "Research completed"
        );
        outcome
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AppError, AppResult};
    use async_trait::async_trait;

    struct FixedSummarizer;

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _text: &str, _context: &SummaryContext) -> AppResult<String> {
            Ok("- bullet".to_string())
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _text: &str, _context: &SummaryContext) -> AppResult<String> {
            Err(AppError::LlmApi("quota exceeded".to_string()))
        }
    }

    fn agent_with(server: &mockito::ServerGuard, summarizer: Box<dyn Summarizer>) -> ResearchAgent {
        let search = GoogleSearchClient::new(
            reqwest::Client::new(),
            "k".to_string(),
            "cx".to_string(),
        )
        .with_base_url(server.url());
        ResearchAgent::new(search, PageFetcher::new(), summarizer)
    }

    #[tokio::test]
    async fn test_empty_search_yields_empty_outcome() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let agent = agent_with(&server, Box::new(FixedSummarizer));
        let outcome = agent.research("obscure query").await;
        assert_eq!(outcome.sources_found, 0);
        assert!(outcome.summaries.is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_degrades_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let agent = agent_with(&server, Box::new(FailingSummarizer));
        let outcome = agent.research("anything").await;
        assert_eq!(outcome.sources_found, 0);
        assert!(outcome.summaries.is_empty());
    }

    #[tokio::test]
    async fn test_unfetchable_sources_are_counted_but_not_summarized() {
        // Search returns results, but the links point at blocked hosts,
        // so every page is skipped. sources_found still reflects the
        // search hit count, which is what drives the
        // "found sources, none summarized" response.
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"items": [
                    {"title": "Blocked", "link": "http://127.0.0.1:1/page"},
                    {"title": "Also blocked", "link": "http://192.168.0.1/page"}
                ]}"#,
            )
            .create_async()
            .await;

        let agent = agent_with(&server, Box::new(FixedSummarizer));
        let outcome = agent.research("anything").await;
        assert_eq!(outcome.sources_found, 2);
        assert!(outcome.summaries.is_empty());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  title ".to_string()), Some("title".to_string()));
        assert_eq!(non_empty("   ".to_string()), None);
        assert_eq!(non_empty(String::new()), None);
    }
}
