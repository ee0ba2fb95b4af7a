use std::sync::Arc;

use crate::agents::ResearchAgent;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub agent: Arc<ResearchAgent>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// One summarized source, as returned by `/search` and accepted by `/export`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SourceSummary {
    pub title: String,
    pub url: String,
    pub summary: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub items: Vec<SourceSummary>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
