use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use research_scout::agents::ResearchAgent;
use research_scout::{config::Config, routes::create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "research_scout=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    // Missing keys don't stop the server; requests that need them fail
    // with an error body instead.
    if config.llm.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY not found. Summarization will fail.");
    }
    if config.search.google_api_key.is_empty() || config.search.google_cse_id.is_empty() {
        warn!("GOOGLE_API_KEY / GOOGLE_CSE_ID not found. Search will fail.");
    }

    // Create shared state
    let agent = Arc::new(ResearchAgent::from_config(&config));
    let state = AppState {
        config: config.clone(),
        agent,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
