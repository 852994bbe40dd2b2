//! Keyword heuristics that turn a raw user message into a task action.
//!
//! Detection looks only at the user's text and the client's task list, never
//! at the LLM reply.

use serde_json::Value;
use thiserror::Error;

use crate::api::types::{NewTask, TaskRecord};

/// Words whose presence signals the user wants a new task.
const ADD_TRIGGERS: &[&str] = &["add", "create", "new task", "remind me"];

/// Split points for the task title, checked in this order.
const ADD_PHRASES: &[&str] = &[
    "add task to ",
    "add task ",
    "add ",
    "create ",
    "remind me to ",
    "new task ",
];

const DELETE_TRIGGERS: &[&str] = &["delete", "remove", "done with", "completed"];

/// Title of the onboarding task the frontend seeds; never offered for deletion.
const PLACEHOLDER_TITLE: &str = "welcome to ai todo!";

/// Titles must be longer than this (in characters) to become a task.
const MIN_TITLE_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add(NewTask),
    /// `task_id` is None when the matched task carried no id.
    Delete { task_id: Option<i64> },
}

/// A task that matched (or had to be inspected) could not be interpreted.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("task id {0} is not a valid integer")]
    InvalidTaskId(String),

    #[error("task title {0} is not a string")]
    InvalidTitle(String),
}

/// Infer at most one action from the message.
///
/// Add intent wins over delete intent: a message containing an add trigger is
/// never considered for deletion, even when no usable title is found.
pub fn detect_action(message: &str, tasks: &[TaskRecord]) -> Result<Option<Action>, IntentError> {
    let lower = message.to_lowercase();

    if ADD_TRIGGERS.iter().any(|w| lower.contains(w)) {
        let title = extract_title(message, &lower);
        if title.chars().count() > MIN_TITLE_CHARS {
            return Ok(Some(Action::Add(NewTask::with_title(title))));
        }
        return Ok(None);
    }

    if DELETE_TRIGGERS.iter().any(|w| lower.contains(w)) {
        for task in tasks {
            let Some(raw) = &task.title else { continue };
            let title = task
                .title()
                .ok_or_else(|| IntentError::InvalidTitle(raw.to_string()))?
                .to_lowercase();
            if title.is_empty() || title == PLACEHOLDER_TITLE || !lower.contains(&title) {
                continue;
            }
            let task_id = task.id.as_ref().map(task_id_from_value).transpose()?;
            return Ok(Some(Action::Delete { task_id }));
        }
    }

    Ok(None)
}

/// Text after the first matching split phrase, whitespace-trimmed, then
/// cleaned of surrounding quotes and sentence punctuation.
///
/// Without a split phrase the whole message is the candidate and only the
/// punctuation pass applies. Whitespace uncovered by that pass is kept.
fn extract_title(message: &str, lower: &str) -> String {
    let rest = ADD_PHRASES
        .iter()
        .find_map(|phrase| {
            let idx = lower.find(phrase)? + phrase.len();
            let tail = match original_offset(message, idx) {
                Some(orig) => &message[orig..],
                None => &lower[idx..],
            };
            Some(tail.trim())
        })
        .unwrap_or(message);

    rest.trim_matches(|c: char| matches!(c, '"' | '\'' | '.' | '!' | '?'))
        .to_string()
}

/// Map a byte offset in `message.to_lowercase()` back onto `message`.
///
/// Lowercasing can change a character's UTF-8 length, so offsets are walked
/// character by character. Returns None if `lower_idx` falls inside the
/// expansion of a single character.
fn original_offset(message: &str, lower_idx: usize) -> Option<usize> {
    let mut acc = 0;
    for (i, c) in message.char_indices() {
        if acc == lower_idx {
            return Some(i);
        }
        if acc > lower_idx {
            return None;
        }
        acc += c.to_lowercase().map(char::len_utf8).sum::<usize>();
    }
    (acc == lower_idx).then_some(message.len())
}

fn task_id_from_value(value: &Value) -> Result<i64, IntentError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| IntentError::InvalidTaskId(value.to_string()))
}

/// Whole floats inside the i64 range. `i64::MAX as f64` rounds up to 2^63,
/// so the upper bound is exclusive.
fn integral_f64(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}
