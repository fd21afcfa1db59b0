use std::sync::Arc;

use crate::llm_client::CompletionClient;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: CompletionClient,
    /// Per-visitor feature and reveal boards, keyed by cookie.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(llm: CompletionClient, max_visitors: usize) -> Self {
        Self {
            llm,
            sessions: Arc::new(SessionStore::new(max_visitors)),
        }
    }
}
