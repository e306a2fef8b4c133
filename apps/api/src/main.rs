mod analyzer;
mod config;
mod controller;
mod errors;
mod extract;
mod files;
mod interview;
mod llm_client;
mod ranker;
mod routes;
mod scoring;
mod sessions;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::sessions::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Suite API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize AI gateway
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_api_url.clone(),
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // In-memory workspaces; nothing is persisted
    let sessions = SessionStore::new(config.interview_duration_secs);
    sessions.spawn_idle_sweep(Duration::from_secs(config.session_idle_secs));
    info!(
        "Session store ready (interview countdown: {}s, idle timeout: {}s)",
        config.interview_duration_secs, config.session_idle_secs
    );

    let state = AppState {
        gateway: Arc::new(llm),
        sessions,
    };

    // Build router
    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front-end host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
