use axum::response::{Html, IntoResponse};
use chrono::{Datelike, Utc};

use crate::models::profile::PROFILE;
use crate::render::render_page;
use crate::sessions::Visitor;

/// GET /
/// Renders the whole single-page site from this visitor's feature states.
pub async fn page_handler(visitor: Visitor) -> impl IntoResponse {
    let board = visitor.session.features.snapshot().await;
    let revealed = visitor.session.reveals.revealed().await;
    let html = render_page(&PROFILE, &board, &revealed, Utc::now().year());
    (visitor.cookie(), Html(html))
}
