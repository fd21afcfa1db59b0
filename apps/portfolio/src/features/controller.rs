//! Request state controller — the per-feature Idle → Pending → Settled machine.
//!
//! The state is a plain value and `transition` is a pure reducer, so the rules
//! are testable without a server. `RequestController` wraps the reducer with
//! ticket allocation and the optional subject (project title, draft topic).
//!
//! Tickets make late settlements inert: a reset drops the pending ticket, so
//! an in-flight call that resolves afterwards no longer matches anything.

use serde::Serialize;

use crate::llm_client::CompletionOutcome;

/// Identifies one request cycle of one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Pending { ticket: Ticket },
    Settled(CompletionOutcome),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending { .. })
    }

    pub fn outcome(&self) -> Option<&CompletionOutcome> {
        match self {
            RequestState::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Text offered to the clipboard: only a settled success has any.
    pub fn copyable_text(&self) -> Option<&str> {
        self.outcome().and_then(CompletionOutcome::text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Submit { ticket: Ticket },
    Resolve { ticket: Ticket, outcome: CompletionOutcome },
    Reset,
}

/// Applies `event` to `state`. `None` means the event is ignored.
///
/// - Submit is accepted from Idle and Settled, ignored while Pending.
/// - Resolve is accepted only for the ticket currently Pending.
/// - Reset is accepted from Pending and Settled.
pub fn transition(state: &RequestState, event: Event) -> Option<RequestState> {
    match (state, event) {
        (RequestState::Pending { .. }, Event::Submit { .. }) => None,
        (_, Event::Submit { ticket }) => Some(RequestState::Pending { ticket }),

        (RequestState::Pending { ticket: current }, Event::Resolve { ticket, outcome })
            if *current == ticket =>
        {
            Some(RequestState::Settled(outcome))
        }
        (_, Event::Resolve { .. }) => None,

        (RequestState::Idle, Event::Reset) => None,
        (_, Event::Reset) => Some(RequestState::Idle),
    }
}

/// One feature's request lifecycle. Never shared between features.
#[derive(Debug)]
pub struct RequestController {
    state: RequestState,
    subject: Option<String>,
    next_ticket: u64,
}

impl RequestController {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            subject: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// What the current cycle is about, e.g. the project title or draft topic.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Starts a new cycle. Returns `None` if a request is already in flight;
    /// the submission is dropped, not queued.
    pub fn submit(&mut self, subject: Option<String>) -> Option<Ticket> {
        let ticket = Ticket(self.next_ticket);
        self.state = transition(&self.state, Event::Submit { ticket })?;
        self.next_ticket += 1;
        self.subject = subject;
        Some(ticket)
    }

    /// Records the result of the cycle identified by `ticket`.
    /// Returns false if the controller was reset (or resubmitted) meanwhile.
    pub fn settle(&mut self, ticket: Ticket, outcome: CompletionOutcome) -> bool {
        match transition(&self.state, Event::Resolve { ticket, outcome }) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }

    /// Dismisses whatever is shown and returns to Idle.
    pub fn reset(&mut self) -> bool {
        match transition(&self.state, Event::Reset) {
            Some(next) => {
                self.state = next;
                self.subject = None;
                true
            }
            None => false,
        }
    }
}
