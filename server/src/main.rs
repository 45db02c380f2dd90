mod config;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::llm::LlmChat;
use crate::rate_limit::RateLimitConfig;

#[tokio::main]
async fn main() {
    // Missing .env is normal in production.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,server=debug")))
        .init();

    let config = ServerConfig::from_env();
    if config.backend_url.is_none() {
        tracing::warn!("IAKWE_BACKEND_URL not set — /api gateway will answer 503");
    }

    // Non-fatal: the invoke endpoint answers 503 without an LLM.
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured — AI features disabled");
            None
        }
    };

    let state =
        state::AppState::new(&config, llm, RateLimitConfig::from_env()).expect("failed to build gateway HTTP client");
    let app = routes::app(state).expect("failed to build router");

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "iakwe-hr listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server failed");
}
