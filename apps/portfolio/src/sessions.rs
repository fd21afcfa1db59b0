//! Per-visitor state, keyed by a cookie.
//!
//! Each browser gets its own feature board and reveal board, so a visitor's
//! results, pending requests and dismissals never reach anyone else. The
//! store is bounded; the least recently seen visitor is evicted first. A
//! cycle still in flight for an evicted visitor settles into a board nobody
//! reads any more.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderName},
};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::features::board::FeatureBoard;
use crate::state::AppState;
use crate::visibility::RevealBoard;

pub const VISITOR_COOKIE: &str = "portfolio_visitor";

/// Everything one visitor's page is rendered from.
#[derive(Debug)]
pub struct VisitorSession {
    pub features: Arc<FeatureBoard>,
    pub reveals: RevealBoard,
}

impl VisitorSession {
    fn new() -> Self {
        Self {
            features: Arc::new(FeatureBoard::new()),
            reveals: RevealBoard::new(),
        }
    }
}

struct Entry {
    session: Arc<VisitorSession>,
    last_seen: u64,
}

struct Sessions {
    entries: HashMap<Uuid, Entry>,
    clock: u64,
}

pub struct SessionStore {
    capacity: usize,
    inner: Mutex<Sessions>,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Sessions {
                entries: HashMap::new(),
                clock: 0,
            }),
        }
    }

    /// Returns the visitor's session, creating it for an unknown id.
    pub async fn session(&self, id: Uuid) -> Arc<VisitorSession> {
        let mut inner = self.inner.lock().await;
        inner.clock += 1;
        let now = inner.clock;

        if let Some(entry) = inner.entries.get_mut(&id) {
            entry.last_seen = now;
            return Arc::clone(&entry.session);
        }

        if inner.entries.len() >= self.capacity {
            let oldest = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                inner.entries.remove(&oldest);
                debug!("Evicted visitor session {oldest}");
            }
        }

        let session = Arc::new(VisitorSession::new());
        inner.entries.insert(
            id,
            Entry {
                session: Arc::clone(&session),
                last_seen: now,
            },
        );
        session
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }
}

/// The visitor behind a request. Requests without a valid cookie start a
/// new session; handlers send the cookie back so the browser keeps it.
pub struct Visitor {
    pub id: Uuid,
    pub session: Arc<VisitorSession>,
}

impl Visitor {
    pub fn cookie(&self) -> [(HeaderName, String); 1] {
        [(
            header::SET_COOKIE,
            format!(
                "{VISITOR_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
                self.id
            ),
        )]
    }
}

fn visitor_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == VISITOR_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

#[async_trait]
impl FromRequestParts<AppState> for Visitor {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = visitor_id(&parts.headers).unwrap_or_else(Uuid::new_v4);
        let session = state.sessions.session(id).await;
        Ok(Visitor { id, session })
    }
}
