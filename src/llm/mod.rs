//! LLM access: a minimal chat-completion abstraction and the
//! OpenAI-compatible provider client used in production.

mod completions;

pub use completions::CompletionsClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message role in a chat completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message sent upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Everything needed for one completion call.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("The API key is not configured (set GROQ_API_KEY)")]
    MissingApiKey,

    #[error("Request to LLM provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LLM provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("LLM provider returned no completion text")]
    EmptyResponse,
}

/// Text-in/text-out completion provider.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run a completion and return the first choice's text verbatim, empty
    /// text included.
    async fn chat_completion(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}
