use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use crate::models::{AppState, ExportRequest};
use crate::report;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/export", post(export_pdf))
        .with_state(state)
}

/// Accept summaries JSON and return a compiled PDF report.
async fn export_pdf(
    State(_state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> AppResult<Response> {
    if request.items.is_empty() {
        return Err(AppError::NoExportItems);
    }

    let query = request.query.as_deref().unwrap_or("Research Summary");
    info!(query = %query, items = request.items.len(), "Exporting PDF report");

    let bytes = report::build_report(query, &request.items)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=summary.pdf",
            ),
        ],
        bytes,
    )
        .into_response())
}
