//! System prompt template for the assistant.

use crate::api::types::TaskRecord;

/// Build the system prompt with the user's current tasks as context.
pub fn build_system_prompt(tasks: &[TaskRecord]) -> String {
    let task_list = if tasks.is_empty() {
        "No tasks yet".to_string()
    } else {
        tasks
            .iter()
            .map(|t| format!("- {}", t.display_title()))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are a friendly AI assistant for a todo app. Be conversational and helpful.

User's current tasks:
{task_list}

When user wants to:
- Add a task: Be encouraging and confirm
- Delete a task: Confirm which one
- View tasks: Summarize them nicely
- Chat casually: Respond naturally but remind them you can help with tasks

Be brief, friendly, and natural. Use emojis occasionally."#,
        task_list = task_list
    )
}
