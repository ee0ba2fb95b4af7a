// Gemini adapter implementation
// API Reference: https://ai.google.dev/api/generate-content
//
// Calls the generateContent endpoint of the Generative Language API.
// The API key travels as a query parameter, not a header.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::provider::{Summarizer, SummaryContext};
use crate::types::{AppError, AppResult};
use crate::utils::retry::with_retry;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Article text beyond this many characters is not sent to the model.
const MAX_CONTENT_CHARS: usize = 8000;

const MAX_ATTEMPTS: u32 = 2;

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

// Request types for the generateContent API
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

// Response types for the generateContent API
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Point the client at a different endpoint. Used by tests with a
    /// mock server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = GenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.3),
                max_output_tokens: None,
            }),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LlmApi(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<GeminiErrorResponse>().await {
                Ok(parsed) => parsed.error.message,
                Err(_) => format!("HTTP {status}"),
            };
            return Err(AppError::LlmApi(message));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::LlmApi(format!("invalid response: {e}")))?;

        let text: String = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::LlmApi("empty response from model".to_string()));
        }

        debug!(model = %self.model, chars = text.len(), "Received summary from Gemini");
        Ok(text)
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, text: &str, context: &SummaryContext) -> AppResult<String> {
        if self.api_key.is_empty() {
            return Err(AppError::MissingApiKeys);
        }
        let prompt = build_prompt(text, context);
        with_retry(MAX_ATTEMPTS, || self.generate(&prompt)).await
    }
}

fn build_prompt(text: &str, context: &SummaryContext) -> String {
    format!(
        "You are a research assistant. Summarize the article into clear bullet points.\n\
         \n\
         Requirements:\n\
         - 5-8 concise bullets.\n\
         - One-sentence tl;dr at top.\n\
         - Include any concrete numbers, dates, names.\n\
         - If the article is older, note its age.\n\
         - Output valid GitHub-flavored Markdown only.\n\
         \n\
         Article title: {title}\n\
         Article URL: {url}\n\
         Article date (if any): {date}\n\
         \n\
         CONTENT (first {max} chars):\n\
         ---\n\
         {content}\n\
         ---",
        title = context.title.as_deref().unwrap_or("Unknown"),
        url = context.url,
        date = context.date_iso.as_deref().unwrap_or("None"),
        max = MAX_CONTENT_CHARS,
        content = head_chars(text, MAX_CONTENT_CHARS),
    )
}

/// First `max` characters of `text`, never splitting a code point.
fn head_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
