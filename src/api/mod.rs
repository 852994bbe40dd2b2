//! HTTP API for the todo assistant.
//!
//! ## Endpoints
//!
//! - `GET /` - Service name and version
//! - `GET /health` - Health check
//! - `OPTIONS /chat` - CORS preflight
//! - `POST /chat` - Send a message with the current task list

mod chat;
mod routes;
pub mod types;

pub use routes::{router, serve, AppState};
