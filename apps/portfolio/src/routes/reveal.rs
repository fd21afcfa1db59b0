use axum::{extract::Path, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::render::page::REVEAL_SECTIONS;
use crate::sessions::Visitor;
use crate::visibility::IntersectionEntry;

/// Intersection report posted by the page script.
#[derive(Debug, Deserialize)]
pub struct RevealReport {
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

/// POST /api/v1/reveal/:section
/// Records that a section scrolled into view so later renders keep it revealed.
pub async fn reveal_handler(
    visitor: Visitor,
    Path(section): Path<String>,
    Json(report): Json<RevealReport>,
) -> Result<impl IntoResponse, AppError> {
    if !REVEAL_SECTIONS.contains(&section.as_str()) {
        return Err(AppError::NotFound(format!("Section '{section}' not found")));
    }

    let entry = IntersectionEntry {
        target: section.clone(),
        intersection_ratio: report.intersection_ratio,
        is_intersecting: report.is_intersecting,
    };
    let revealed_now = visitor.session.reveals.report(entry).await;
    let visible = visitor.session.reveals.revealed().await.contains(&section);

    Ok((
        visitor.cookie(),
        Json(json!({
            "section": section,
            "visible": visible,
            "revealed_now": revealed_now,
        })),
    ))
}
