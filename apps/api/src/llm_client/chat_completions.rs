//! Older provider convention: `POST /chat/completions`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{post_json, ApiStyle, ChatTurn, CompletionAdapter, CompletionRequest, Credential, LlmError};

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct ChatCompletionsAdapter;

#[async_trait]
impl CompletionAdapter for ChatCompletionsAdapter {
    fn style(&self) -> ApiStyle {
        ApiStyle::ChatCompletions
    }

    async fn complete(
        &self,
        http: &Client,
        base_url: &str,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        let body = ChatCompletionsRequest {
            model: request.model,
            messages: &request.turns,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let url = format!("{base_url}/chat/completions");
        let response: ChatCompletionsResponse = post_json(http, &url, credential, &body).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)
    }
}
