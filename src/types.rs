// Crate-wide error type and result alias

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("One or more API keys are missing. Check your .env.")]
    MissingApiKeys,

    #[error("Search query cannot be empty.")]
    EmptyQuery,

    #[error("Found sources, but none could be summarized. Likely paywalls, video links, or blocked scrapers.")]
    NothingSummarized,

    #[error("No items to export.")]
    NoExportItems,

    #[error("LLM API error: {0}")]
    LlmApi(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyQuery | AppError::NoExportItems => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Errors render as `{"error": "..."}` bodies so the browser UI can show
// them directly.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
