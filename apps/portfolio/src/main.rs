mod config;
mod errors;
mod features;
mod llm_client;
mod models;
mod render;
mod routes;
mod sessions;
mod state;
mod visibility;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::CompletionClient;
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

    info!("Starting portfolio v{}", env!("CARGO_PKG_VERSION"));

    let llm = CompletionClient::new(&config);
    if llm.has_api_key() {
        info!("Completion client initialized (model: {})", llm.model());
    } else {
        // Not fatal: every AI feature reports the missing key to the visitor.
        warn!("GEMINI_API_KEY is not set; AI features will report a configuration error");
    }

    let state = AppState::new(llm, config.max_visitors);

    let app = build_router(state, &config.static_dir).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr} (static assets from '{}')", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
