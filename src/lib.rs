//! # Todo Assistant
//!
//! Chat backend for an AI todo app.
//!
//! This library provides:
//! - An HTTP API that accepts a chat message plus the client's task list
//! - A single completion call to an OpenAI-compatible LLM provider (Groq by default)
//! - Keyword heuristics that turn the message into an optional add/delete action
//!
//! ## Example
//!
//! ```rust,ignore
//! use todo_assistant::{assistant::Assistant, api::types::ChatRequest, Config};
//!
//! let config = Config::from_env()?;
//! let assistant = Assistant::new(config.llm);
//! let reply = assistant
//!     .respond(&ChatRequest { message: "add buy milk".into(), tasks: vec![] })
//!     .await;
//! ```

pub mod api;
pub mod assistant;
pub mod config;
pub mod llm;

pub use config::Config;
