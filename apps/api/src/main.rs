mod config;
mod eligibility;
mod errors;
mod llm_client;
mod policy;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::policy::PolicyStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PolicyPulse API v{}", env!("CARGO_PKG_VERSION"));

    // Load the bundled policy database (fails fast on a broken asset)
    let store = Arc::new(PolicyStore::load()?);
    info!(
        "Policy store loaded: {} schemes, {} states/UTs",
        store.records().len(),
        store.states().len()
    );

    // Initialize the reasoning client. A missing credential is not fatal;
    // requests resolve through the fallback path until one is supplied.
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY not set; reasoning calls will fail until configured");
    }
    let reasoning = GeminiClient::new(config.gemini_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        reasoning: Arc::new(reasoning),
        store,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
