/// Completion client — the single point of entry for all Gemini calls on the site.
///
/// ARCHITECTURAL RULE: No other module may call the generative API directly.
/// Every AI feature goes through `CompletionClient::complete`, which never fails:
/// all error paths come back as `CompletionOutcome::Failure`.
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

/// Why a completion did not produce text. Rendered verbatim to the visitor.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error(
        "API key is missing. Add GEMINI_API_KEY=YOUR_KEY to the environment or to a .env file \
         in the project root, then restart the server."
    )]
    Configuration,

    #[error(
        "An error occurred while contacting the API: {0}. \
         Check your network connection and the server logs."
    )]
    Transport(String),

    #[error(
        "API call failed (HTTP {status}). Details: {detail}. \
         Check the server logs for the full response."
    )]
    Upstream { status: u16, detail: String },

    #[error("No content generated. The response may have been blocked. Reason: {reason}.")]
    Content { reason: String },
}

/// Outcome of one completion call. Exactly one variant is ever populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionOutcome {
    Success { text: String },
    Failure { message: String },
}

impl CompletionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionOutcome::Success { .. })
    }

    /// The generated text, if the call succeeded.
    pub fn text(&self) -> Option<&str> {
        match self {
            CompletionOutcome::Success { text } => Some(text),
            CompletionOutcome::Failure { .. } => None,
        }
    }

    /// Generated text on success, error message on failure.
    pub fn display_text(&self) -> &str {
        match self {
            CompletionOutcome::Success { text } => text,
            CompletionOutcome::Failure { message } => message,
        }
    }
}

impl From<Result<String, CompletionError>> for CompletionOutcome {
    fn from(result: Result<String, CompletionError>) -> Self {
        match result {
            Ok(text) => CompletionOutcome::Success { text },
            Err(e) => CompletionOutcome::Failure {
                message: e.to_string(),
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }

    /// The prompt carried by the first part. Used for logging and test fakes.
    pub fn prompt(&self) -> &str {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .map(|p| p.text)
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, ignoring empty strings.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Transport seam
// ────────────────────────────────────────────────────────────────────────────

/// Status and raw body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Network-level failure: DNS, connect, reset, timeout, unreadable body.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key in its query string.
        TransportError(e.without_url().to_string())
    }
}

/// Sends one JSON POST and hands back whatever came over the wire.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &GenerateContentRequest<'_>,
    ) -> Result<RawResponse, TransportError>;
}

/// `reqwest`-backed transport. Uses the client's default timeouts.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &GenerateContentRequest<'_>,
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single completion client shared by every AI feature.
/// Single-shot: no retries, no caching, no streaming.
#[derive(Clone)]
pub struct CompletionClient {
    transport: Arc<dyn Transport>,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl CompletionClient {
    pub fn new(config: &Config) -> Self {
        Self::with_transport(
            Arc::new(HttpTransport::new()),
            config.gemini_api_key.clone(),
            &config.gemini_api_base,
            &config.gemini_model,
        )
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        api_key: Option<String>,
        api_base: &str,
        model: &str,
    ) -> Self {
        Self {
            transport,
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.to_string(),
            endpoint: format!(
                "{}/models/{}:generateContent",
                api_base.trim_end_matches('/'),
                model
            ),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Runs one completion and normalizes every failure into an outcome value.
    pub async fn complete(&self, prompt: &str) -> CompletionOutcome {
        let result = self.try_complete(prompt).await;
        if let Err(e) = &result {
            warn!("Completion failed: {e:?}");
        }
        result.into()
    }

    /// Same as `complete`, but keeps the typed error.
    pub async fn try_complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::Configuration)?;

        let request = GenerateContentRequest::from_prompt(prompt);
        debug!(
            "Sending completion request: model={}, prompt_chars={}",
            self.model,
            request.prompt().chars().count()
        );

        let raw = self
            .transport
            .post_json(&self.endpoint, api_key, &request)
            .await
            .map_err(|e| CompletionError::Transport(e.0))?;

        interpret_response(raw)
    }
}

/// Maps a raw HTTP exchange onto generated text or a typed failure.
fn interpret_response(raw: RawResponse) -> Result<String, CompletionError> {
    if !(200..300).contains(&raw.status) {
        warn!("Completion API returned {}: {}", raw.status, raw.body);
        let detail = serde_json::from_str::<ApiErrorEnvelope>(&raw.body)
            .ok()
            .and_then(|e| e.error.message)
            .unwrap_or_else(|| format!("HTTP status {}", raw.status));
        return Err(CompletionError::Upstream {
            status: raw.status,
            detail,
        });
    }

    let parsed: GenerateContentResponse = serde_json::from_str(&raw.body)
        .map_err(|e| CompletionError::Transport(format!("unreadable response body ({e})")))?;

    match parsed.text() {
        Some(text) => {
            debug!("Completion succeeded: {} chars", text.chars().count());
            Ok(text.to_string())
        }
        None => {
            warn!("No content in completion response: {}", raw.body);
            Err(CompletionError::Content {
                reason: parsed
                    .finish_reason()
                    .unwrap_or("Unknown reason")
                    .to_string(),
            })
        }
    }
}
