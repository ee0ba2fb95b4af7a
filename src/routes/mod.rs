//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/` - Browser UI (embedded page)
//! - `/search` - Search-and-summarize a query
//! - `/export` - Compile summaries into a PDF report
//! - `/api/health` - Health checks

pub mod export;
pub mod health;
pub mod search;
pub mod ui;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    Router::new()
        .merge(search::router(state.clone()))
        .merge(export::router(state))
        .merge(health::router())
        .merge(ui::router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ResearchAgent;
    use crate::config::{Config, LlmConfig, SearchConfig, ServerConfig};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(with_keys: bool) -> AppState {
        let key = if with_keys { "k" } else { "" };
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            search: SearchConfig {
                google_api_key: key.to_string(),
                google_cse_id: key.to_string(),
            },
            llm: LlmConfig {
                gemini_api_key: key.to_string(),
                model: "gemini-2.5-flash".to_string(),
            },
        };
        let agent = Arc::new(ResearchAgent::from_config(&config));
        AppState { config, agent }
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(state(true));
        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_serves_html() {
        let app = create_router(state(true));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_rejects_missing_keys() {
        let app = create_router(state(false));
        let response = app
            .oneshot(post_json("/search", r#"{"query": "rust"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(
            json["error"],
            "One or more API keys are missing. Check your .env."
        );
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let app = create_router(state(true));
        let response = app
            .oneshot(post_json("/search", r#"{"query": "   "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Search query cannot be empty.");
    }

    #[tokio::test]
    async fn test_export_rejects_empty_items() {
        let app = create_router(state(true));
        let response = app
            .oneshot(post_json("/export", r#"{"query": "q", "items": []}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "No items to export.");
    }

    #[tokio::test]
    async fn test_export_returns_pdf_attachment() {
        let app = create_router(state(true));
        let body = r#"{
            "query": "rust async",
            "items": [{"title": "T", "url": "https://example.com", "summary": "- a point"}]
        }"#;
        let response = app.oneshot(post_json("/export", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=summary.pdf"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
