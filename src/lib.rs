// Research Scout - search-and-summarize research agent backend

pub mod agents;
pub mod config;
pub mod extract;
pub mod llm;
pub mod models;
pub mod report;
pub mod routes;
pub mod search;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
