//! Client for OpenAI-compatible `/chat/completions` endpoints (Groq by default).

use async_trait::async_trait;
use serde::Deserialize;

use super::{CompletionRequest, LlmClient, LlmError};
use crate::config::LlmConfig;

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CompletionsClient {
    api_key: Option<String>,
    url: String,
    client: reqwest::Client,
}

impl CompletionsClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            url: completions_url(&config.base_url),
            client: reqwest::Client::new(),
        }
    }
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[async_trait]
impl LlmClient for CompletionsClient {
    async fn chat_completion(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        tracing::debug!(
            url = %self.url,
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}
