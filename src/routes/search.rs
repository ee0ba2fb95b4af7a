use axum::{extract::State, routing::post, Json, Router};
use tracing::info;
use uuid::Uuid;

use crate::models::{AppState, SearchRequest, SourceSummary};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", post(run_search))
        .with_state(state)
}

async fn run_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<Vec<SourceSummary>>> {
    if !state.config.has_all_keys() {
        return Err(AppError::MissingApiKeys);
    }

    let query = request.query.trim();
    if query.is_empty() {
        return Err(AppError::EmptyQuery);
    }

    let request_id = Uuid::new_v4();
    info!(request_id = %request_id, query = %query, "Received search request");

    let outcome = state.agent.research(query).await;

    // Sources came back but every page failed extraction or
    // summarization; surface that as the documented error instead of an
    // empty success.
    if outcome.sources_found > 0 && outcome.summaries.is_empty() {
        return Err(AppError::NothingSummarized);
    }

    info!(
        request_id = %request_id,
        summaries = outcome.summaries.len(),
        "Search request completed"
    );
    Ok(Json(outcome.summaries))
}
