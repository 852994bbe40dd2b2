//! API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A task as supplied by the client.
///
/// Only `id` and `title` are inspected; every other field is carried through
/// untouched. Both are kept as raw JSON so a malformed task never rejects the
/// whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskRecord {
    /// The title, if it is a JSON string.
    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().and_then(Value::as_str)
    }

    /// The title for display: strings as-is, other JSON values as their JSON text.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

/// A freshly constructed task returned with an `add_task` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: String,
    pub category: String,
    pub due_date: String,
    pub repeat: String,
}

impl NewTask {
    /// Task with the app defaults: medium priority, personal, no due date, no repeat.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            completed: false,
            priority: "Medium".to_string(),
            category: "Personal".to_string(),
            due_date: String::new(),
            repeat: "No Repeat".to_string(),
        }
    }
}

/// Action inferred from the user's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AddTask,
    DeleteTask,
}

/// Request body for `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's raw message
    pub message: String,

    /// The client's current task list
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

/// Response body for `POST /chat`. All keys are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant reply, or an error message when the upstream call failed
    pub response: String,

    pub action: Option<ActionKind>,

    pub task: Option<NewTask>,

    pub task_id: Option<i64>,
}

impl ChatResponse {
    /// Reply with no action attached.
    pub fn reply(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            action: None,
            task: None,
            task_id: None,
        }
    }
}

/// Response for `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
}
