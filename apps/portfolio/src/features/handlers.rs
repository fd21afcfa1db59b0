//! Axum route handlers for the AI features.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::features::board::{BoardSnapshot, Feature, FeatureSnapshot};
use crate::features::prompts::{career_coach_prompt, message_draft_prompt, project_insight_prompt};
use crate::llm_client::prompts::PING_PROMPT;
use crate::models::profile::PROFILE;
use crate::sessions::Visitor;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Fields posted by the feature forms. Each feature reads only its own.
#[derive(Debug, Default, Deserialize)]
pub struct FeatureForm {
    /// Index into the project list (project insights).
    pub project: Option<usize>,
    /// Conversation topic (message draft).
    pub topic: Option<String>,
}

/// Builds the subject and prompt for one feature submission.
fn build_request(feature: Feature, form: &FeatureForm) -> Result<(Option<String>, String), AppError> {
    match feature {
        Feature::CareerCoach => Ok((None, career_coach_prompt(&PROFILE))),
        Feature::ProjectInsights => {
            let index = form
                .project
                .ok_or_else(|| AppError::Validation("project is required".to_string()))?;
            let project = PROFILE
                .project(index)
                .ok_or_else(|| AppError::NotFound(format!("Project {index} not found")))?;
            Ok((
                Some(project.title.to_string()),
                project_insight_prompt(project),
            ))
        }
        Feature::MessageDraft => {
            let topic = form.topic.as_deref().map(str::trim).unwrap_or_default();
            if topic.is_empty() {
                return Err(AppError::Validation("topic cannot be empty".to_string()));
            }
            Ok((
                Some(topic.to_string()),
                message_draft_prompt(&PROFILE, topic),
            ))
        }
        Feature::ServiceStatus => Ok((None, PING_PROMPT.to_string())),
    }
}

fn parse_feature(slug: &str) -> Result<Feature, AppError> {
    slug.parse::<Feature>().map_err(AppError::NotFound)
}

fn back_to(feature: Feature) -> Redirect {
    Redirect::to(&format!("/#{}", feature.anchor()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /features/:feature
///
/// Records Pending, hands the call to a background task and redirects back to
/// the feature's section right away; the page polls until the cycle settles.
/// A submission while the feature is already pending is ignored.
pub async fn handle_run_feature(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(slug): Path<String>,
    Form(form): Form<FeatureForm>,
) -> Result<impl IntoResponse, AppError> {
    let feature = parse_feature(&slug)?;
    let (subject, prompt) = build_request(feature, &form)?;

    let started = visitor
        .session
        .features
        .start(&state.llm, feature, subject, prompt)
        .await;
    if started.is_none() {
        debug!("{feature:?}: visitor {} already has a request in flight", visitor.id);
    }

    Ok((visitor.cookie(), back_to(feature)))
}

/// POST /features/:feature/dismiss
///
/// Returns the feature to Idle. A response still in flight will be dropped.
pub async fn handle_dismiss_feature(
    visitor: Visitor,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let feature = parse_feature(&slug)?;
    visitor.session.features.dismiss(feature).await;
    Ok((visitor.cookie(), back_to(feature)))
}

/// GET /api/v1/features
pub async fn handle_list_features(visitor: Visitor) -> impl IntoResponse {
    let snapshot: BoardSnapshot = visitor.session.features.snapshot().await;
    (visitor.cookie(), Json(snapshot))
}

/// GET /api/v1/features/:feature
pub async fn handle_get_feature(
    visitor: Visitor,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let feature = parse_feature(&slug)?;
    let snapshot: FeatureSnapshot = visitor.session.features.feature_snapshot(feature).await;
    Ok((visitor.cookie(), Json(snapshot)))
}
