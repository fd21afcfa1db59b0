use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version, whether the AI features have a key, and how many
/// visitor sessions are held.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "portfolio",
        "model": state.llm.model(),
        "api_key_configured": state.llm.has_api_key(),
        "visitors": state.sessions.len().await,
    }))
}
