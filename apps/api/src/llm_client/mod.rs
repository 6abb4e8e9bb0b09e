//! LLM Client: the single point of entry for all provider calls in PitchBot.
//!
//! ARCHITECTURAL RULE: No other module may call the provider API directly.
//! All LLM interactions MUST go through `GenerationClient`.
//!
//! The provider has shipped two incompatible calling conventions. Each one is a
//! `CompletionAdapter`; the client picks one at startup (explicitly or by probing
//! the provider) and never switches per call.
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod chat_completions;
pub mod responses;

use chat_completions::ChatCompletionsAdapter;
use responses::ResponsesAdapter;

/// Model identifier for the standard tier.
pub const STANDARD_MODEL: &str = "gpt-3.5-turbo";
/// Model identifier for the advanced tier.
pub const ADVANCED_MODEL: &str = "gpt-4";
const MAX_TOKENS: u32 = 2500;
const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("endpoint {endpoint} is not supported by this provider (status {status})")]
    InterfaceShape { endpoint: String, status: u16 },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Which provider calling convention to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStyle {
    /// Newer convention: `POST /responses`.
    Responses,
    /// Older convention: `POST /chat/completions`.
    ChatCompletions,
}

/// Model tier requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    #[default]
    Standard,
    Advanced,
}

impl ModelTier {
    pub fn model_id(self) -> &'static str {
        match self {
            ModelTier::Standard => STANDARD_MODEL,
            ModelTier::Advanced => ADVANCED_MODEL,
        }
    }
}

/// A provider API key. Never printed in full.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tail: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        write!(f, "Credential(****{tail})")
    }
}

/// Process-level credentials, consulted when a request brings none.
#[derive(Debug, Clone, Default)]
pub struct CredentialChain {
    /// `OPENAI_API_KEY`.
    pub process_default: Option<Credential>,
    /// `DEFAULT_OPENAI_API_KEY`.
    pub baseline: Option<Credential>,
}

impl CredentialChain {
    /// Effective credential: request override, then process default, then
    /// baseline. Blank keys are skipped.
    pub fn resolve<'a>(&'a self, request_override: Option<&'a Credential>) -> Option<&'a Credential> {
        [request_override, self.process_default.as_ref(), self.baseline.as_ref()]
            .into_iter()
            .flatten()
            .find(|c| !c.is_blank())
    }
}

/// One instruction turn sent to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: &'static str,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Convention-neutral parameters of a single completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: &'static str,
    pub turns: Vec<ChatTurn>,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// One provider calling convention.
#[async_trait]
pub trait CompletionAdapter: Send + Sync {
    fn style(&self) -> ApiStyle;

    async fn complete(
        &self,
        http: &Client,
        base_url: &str,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Posts `body` as JSON and decodes the success payload.
///
/// Any non-2xx answer carrying a provider error body becomes `Api` with the
/// provider message. A bare 404/405 means the endpoint itself is missing and
/// is reported as `InterfaceShape`.
pub(crate) async fn post_json<B, T>(
    http: &Client,
    url: &str,
    credential: &Credential,
    body: &B,
) -> Result<T, LlmError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = http
        .post(url)
        .bearer_auth(credential.expose())
        .header("content-type", "application/json")
        .json(body)
        .send()
        .await?;

    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let provider_message = serde_json::from_str::<ProviderError>(&body)
            .ok()
            .map(|e| e.error.message);

        let message = match provider_message {
            Some(message) => message,
            None if status == StatusCode::NOT_FOUND
                || status == StatusCode::METHOD_NOT_ALLOWED =>
            {
                return Err(LlmError::InterfaceShape {
                    endpoint: url.to_string(),
                    status: status.as_u16(),
                });
            }
            None => body,
        };

        warn!("LLM API returned {}: {}", status, message);
        return Err(LlmError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// The single LLM client used by the proposal pipeline.
///
/// Holds no credential of its own: the caller passes the effective key on
/// every call, so concurrent requests with different keys never interfere.
#[derive(Clone)]
pub struct GenerationClient {
    http: Client,
    base_url: String,
    adapter: Arc<dyn CompletionAdapter>,
}

impl GenerationClient {
    /// Builds a client bound to a known calling convention.
    pub fn new(base_url: &str, timeout: Duration, style: ApiStyle) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, base_url, style))
    }

    /// Builds a client, probing the provider when no style is configured.
    pub async fn connect(
        base_url: &str,
        timeout: Duration,
        style: Option<ApiStyle>,
        probe_credential: Option<&Credential>,
    ) -> Result<Self, LlmError> {
        let style = match style {
            Some(style) => style,
            None => {
                let http = Client::builder().timeout(timeout).build()?;
                probe_api_style(&http, base_url, probe_credential).await
            }
        };
        Self::new(base_url, timeout, style)
    }

    fn with_http(http: Client, base_url: &str, style: ApiStyle) -> Self {
        let adapter: Arc<dyn CompletionAdapter> = match style {
            ApiStyle::Responses => Arc::new(ResponsesAdapter),
            ApiStyle::ChatCompletions => Arc::new(ChatCompletionsAdapter),
        };
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            adapter,
        }
    }

    pub fn style(&self) -> ApiStyle {
        self.adapter.style()
    }

    /// Sends the (system, user) pair to the model and returns the raw text.
    pub async fn generate(
        &self,
        credential: &Credential,
        tier: ModelTier,
        system: &str,
        user: &str,
    ) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: tier.model_id(),
            turns: vec![ChatTurn::system(system), ChatTurn::user(user)],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let text = self
            .adapter
            .complete(&self.http, &self.base_url, credential, &request)
            .await?;

        if text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }

        debug!(
            "LLM call succeeded: model={}, style={:?}, chars={}",
            request.model,
            self.style(),
            text.len()
        );

        Ok(text)
    }
}

/// Decides which calling convention the provider speaks.
///
/// Sends an empty request to the newer endpoint: a 404/405 means the endpoint is
/// missing, anything else (including 400/401) means it exists. Transport failures
/// fall back to the older convention, which every provider version accepts.
pub async fn probe_api_style(
    http: &Client,
    base_url: &str,
    credential: Option<&Credential>,
) -> ApiStyle {
    let url = format!("{}/responses", base_url.trim_end_matches('/'));
    let mut request = http.post(&url).json(&serde_json::json!({}));
    if let Some(credential) = credential {
        request = request.bearer_auth(credential.expose());
    }

    let style = match request.send().await {
        Ok(response)
            if matches!(
                response.status(),
                StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED
            ) =>
        {
            ApiStyle::ChatCompletions
        }
        Ok(_) => ApiStyle::Responses,
        Err(e) => {
            warn!("Provider capability probe failed ({e}); using chat completions");
            ApiStyle::ChatCompletions
        }
    };

    info!("Provider API style selected: {:?}", style);
    style
}
