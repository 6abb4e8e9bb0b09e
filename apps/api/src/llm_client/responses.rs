//! Newer provider convention: `POST /responses`.
//!
//! The same ordered turns are sent as `input`; the reply is either the flattened
//! `output_text` convenience field or a list of output items.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{post_json, ApiStyle, ChatTurn, CompletionAdapter, CompletionRequest, Credential, LlmError};

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a [ChatTurn],
    max_output_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

impl ResponsesReply {
    fn into_text(self) -> Option<String> {
        if let Some(text) = self.output_text.filter(|t| !t.is_empty()) {
            return Some(text);
        }
        self.output
            .into_iter()
            .flat_map(|item| item.content)
            .find(|c| c.kind == "output_text")
            .and_then(|c| c.text)
    }
}

pub struct ResponsesAdapter;

#[async_trait]
impl CompletionAdapter for ResponsesAdapter {
    fn style(&self) -> ApiStyle {
        ApiStyle::Responses
    }

    async fn complete(
        &self,
        http: &Client,
        base_url: &str,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        let body = ResponsesRequest {
            model: request.model,
            input: &request.turns,
            max_output_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let url = format!("{base_url}/responses");
        let reply: ResponsesReply = post_json(http, &url, credential, &body).await?;

        reply.into_text().ok_or(LlmError::EmptyContent)
    }
}
