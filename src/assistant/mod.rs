//! Assistant module - the chat handler behind `POST /chat`.
//!
//! One request is handled in three steps:
//! 1. Build a system prompt that lists the client's current tasks
//! 2. Ask the LLM for a single reply
//! 3. Scan the user's raw message for add/delete intent

mod intent;
mod prompt;

pub use intent::{detect_action, Action, IntentError};
pub use prompt::build_system_prompt;

use std::sync::Arc;

use thiserror::Error;

use crate::api::types::{ActionKind, ChatRequest, ChatResponse};
use crate::config::LlmConfig;
use crate::llm::{ChatMessage, CompletionRequest, CompletionsClient, LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Intent(#[from] IntentError),
}

/// Stateless chat handler. Cheap to share behind an `Arc`.
pub struct Assistant {
    config: LlmConfig,
    llm: Arc<dyn LlmClient>,
}

impl Assistant {
    /// Create an assistant that talks to the configured provider.
    pub fn new(config: LlmConfig) -> Self {
        let llm = Arc::new(CompletionsClient::new(&config));
        Self { config, llm }
    }

    /// Create an assistant with a custom LLM client (useful for testing).
    pub fn with_client(config: LlmConfig, llm: Arc<dyn LlmClient>) -> Self {
        Self { config, llm }
    }

    /// Handle one chat request.
    ///
    /// Never fails: any error becomes the reply text with no action attached.
    pub async fn respond(&self, request: &ChatRequest) -> ChatResponse {
        match self.try_respond(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                ChatResponse::reply(format!("Oops! Something went wrong: {}", e))
            }
        }
    }

    async fn try_respond(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let completion = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(build_system_prompt(&request.tasks)),
                ChatMessage::user(request.message.clone()),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let reply = self.llm.chat_completion(&completion).await?;
        let mut response = ChatResponse::reply(reply);

        match detect_action(&request.message, &request.tasks)? {
            Some(Action::Add(task)) => {
                tracing::info!(title = %task.title, "Detected add_task intent");
                response.action = Some(ActionKind::AddTask);
                response.task = Some(task);
            }
            Some(Action::Delete { task_id }) => {
                tracing::info!(task_id = ?task_id, "Detected delete_task intent");
                response.action = Some(ActionKind::DeleteTask);
                response.task_id = task_id;
            }
            None => tracing::debug!("No task action detected"),
        }

        Ok(response)
    }
}
