use async_trait::async_trait;

use crate::types::AppResult;

/// Article metadata passed alongside the text being summarized. The
/// prompt surfaces it so the model can attribute and date the summary.
#[derive(Debug, Clone, Default)]
pub struct SummaryContext {
    pub title: Option<String>,
    pub url: String,
    pub date_iso: Option<String>,
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, context: &SummaryContext) -> AppResult<String>;
}
