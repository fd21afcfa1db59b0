//! Feature board — owns one request controller per AI feature and drives the
//! submit → complete → settle cycle against the completion client.
//!
//! Each controller has its own lock, so features never block each other, and
//! no lock is held while the network call is outstanding. Every visitor gets
//! their own board (see `sessions`).

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::features::controller::{RequestController, RequestState, Ticket};
use crate::features::status::ServiceStatus;
use crate::llm_client::{CompletionClient, CompletionOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    CareerCoach,
    ProjectInsights,
    MessageDraft,
    ServiceStatus,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::CareerCoach,
        Feature::ProjectInsights,
        Feature::MessageDraft,
        Feature::ServiceStatus,
    ];

    /// URL segment, matching the serialized name.
    pub fn slug(self) -> &'static str {
        match self {
            Feature::CareerCoach => "career-coach",
            Feature::ProjectInsights => "project-insights",
            Feature::MessageDraft => "message-draft",
            Feature::ServiceStatus => "service-status",
        }
    }

    /// In-page anchor the feature lives under; form posts redirect back here.
    pub fn anchor(self) -> &'static str {
        match self {
            Feature::CareerCoach => "about",
            Feature::ProjectInsights => "projects",
            Feature::MessageDraft => "contact",
            Feature::ServiceStatus => "footer",
        }
    }

    /// Shown in place of the result while the request is in flight.
    pub fn pending_text(self) -> &'static str {
        match self {
            Feature::CareerCoach => "Analyzing profile...",
            Feature::ProjectInsights => "Generating insights...",
            Feature::MessageDraft => "Generating draft...",
            Feature::ServiceStatus => "Checking...",
        }
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.slug() == s)
            .ok_or_else(|| format!("Unknown feature '{s}'"))
    }
}

/// How a started request cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The outcome was stored on the controller.
    Settled,
    /// The call completed but the feature was dismissed meanwhile.
    Dropped,
}

/// Point-in-time copy of one controller, safe to render without holding locks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSnapshot {
    pub feature: Feature,
    pub subject: Option<String>,
    #[serde(flatten)]
    pub state: RequestState,
}

impl FeatureSnapshot {
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn outcome(&self) -> Option<&CompletionOutcome> {
        self.state.outcome()
    }

    pub fn copyable_text(&self) -> Option<&str> {
        self.state.copyable_text()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub career_coach: FeatureSnapshot,
    pub project_insights: FeatureSnapshot,
    pub message_draft: FeatureSnapshot,
    pub service_status: FeatureSnapshot,
    pub service_status_summary: ServiceStatus,
}

impl BoardSnapshot {
    pub fn get(&self, feature: Feature) -> &FeatureSnapshot {
        match feature {
            Feature::CareerCoach => &self.career_coach,
            Feature::ProjectInsights => &self.project_insights,
            Feature::MessageDraft => &self.message_draft,
            Feature::ServiceStatus => &self.service_status,
        }
    }
}

#[derive(Debug)]
pub struct FeatureBoard {
    career_coach: Mutex<RequestController>,
    project_insights: Mutex<RequestController>,
    message_draft: Mutex<RequestController>,
    service_status: Mutex<RequestController>,
}

impl FeatureBoard {
    pub fn new() -> Self {
        Self {
            career_coach: Mutex::new(RequestController::new()),
            project_insights: Mutex::new(RequestController::new()),
            message_draft: Mutex::new(RequestController::new()),
            service_status: Mutex::new(RequestController::new()),
        }
    }

    fn controller(&self, feature: Feature) -> &Mutex<RequestController> {
        match feature {
            Feature::CareerCoach => &self.career_coach,
            Feature::ProjectInsights => &self.project_insights,
            Feature::MessageDraft => &self.message_draft,
            Feature::ServiceStatus => &self.service_status,
        }
    }

    /// Starts one request cycle for `feature`.
    ///
    /// Pending is recorded before this returns; the call and the settlement
    /// run on a spawned task, so they finish even if the caller goes away.
    /// Returns `None` without issuing a call if a request is already in flight.
    pub async fn start(
        self: &Arc<Self>,
        llm: &CompletionClient,
        feature: Feature,
        subject: Option<String>,
        prompt: String,
    ) -> Option<JoinHandle<RunStatus>> {
        let ticket = self.controller(feature).lock().await.submit(subject);
        let Some(ticket) = ticket else {
            debug!("{feature:?}: request already in flight, submission ignored");
            return None;
        };

        info!("{feature:?}: request started");
        let board = Arc::clone(self);
        let llm = llm.clone();
        Some(tokio::spawn(async move {
            board.finish(&llm, feature, ticket, &prompt).await
        }))
    }

    async fn finish(
        &self,
        llm: &CompletionClient,
        feature: Feature,
        ticket: Ticket,
        prompt: &str,
    ) -> RunStatus {
        let outcome = llm.complete(prompt).await;
        let succeeded = outcome.is_success();

        let mut controller = self.controller(feature).lock().await;
        if controller.settle(ticket, outcome) {
            info!("{feature:?}: request settled (success={succeeded})");
            RunStatus::Settled
        } else {
            debug!("{feature:?}: dismissed before the response arrived, result dropped");
            RunStatus::Dropped
        }
    }

    /// Explicit dismissal. Returns false if there was nothing to dismiss.
    pub async fn dismiss(&self, feature: Feature) -> bool {
        self.controller(feature).lock().await.reset()
    }

    pub async fn feature_snapshot(&self, feature: Feature) -> FeatureSnapshot {
        let controller = self.controller(feature).lock().await;
        FeatureSnapshot {
            feature,
            subject: controller.subject().map(str::to_string),
            state: controller.state().clone(),
        }
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        let service_status = self.feature_snapshot(Feature::ServiceStatus).await;
        BoardSnapshot {
            career_coach: self.feature_snapshot(Feature::CareerCoach).await,
            project_insights: self.feature_snapshot(Feature::ProjectInsights).await,
            message_draft: self.feature_snapshot(Feature::MessageDraft).await,
            service_status_summary: ServiceStatus::from_state(&service_status.state),
            service_status,
        }
    }
}
