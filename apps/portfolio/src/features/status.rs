//! Service-status probe — a controller whose outcome text is thrown away.
//! Only reachability matters: any success is "operational", any failure is not.

use serde::Serialize;

use crate::features::controller::RequestState;
use crate::llm_client::CompletionOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Unknown,
    Checking,
    Operational,
    ConnectionFailed,
}

impl ServiceStatus {
    pub fn from_state(state: &RequestState) -> Self {
        match state {
            RequestState::Idle => ServiceStatus::Unknown,
            RequestState::Pending { .. } => ServiceStatus::Checking,
            RequestState::Settled(CompletionOutcome::Success { .. }) => ServiceStatus::Operational,
            RequestState::Settled(CompletionOutcome::Failure { .. }) => {
                ServiceStatus::ConnectionFailed
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceStatus::Unknown => "Unknown",
            ServiceStatus::Checking => "Checking...",
            ServiceStatus::Operational => "AI Services Operational",
            ServiceStatus::ConnectionFailed => "API Connection Failed",
        }
    }

    /// CSS modifier used by the footer indicator.
    pub fn tone(self) -> &'static str {
        match self {
            ServiceStatus::Unknown => "muted",
            ServiceStatus::Checking => "warn",
            ServiceStatus::Operational => "ok",
            ServiceStatus::ConnectionFailed => "error",
        }
    }
}
