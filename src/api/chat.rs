//! Chat and service-info handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::Instrument;
use uuid::Uuid;

use super::routes::AppState;
use super::types::{ChatRequest, ChatResponse, HealthResponse, RootResponse};

pub const API_NAME: &str = "AI Todo API";
pub const API_VERSION: &str = "1.0";

/// GET / - Liveness message.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: API_NAME,
        version: API_VERSION,
    })
}

/// GET /health - Health check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// OPTIONS /chat - Fixed preflight answer with wildcard origin and headers.
pub async fn chat_options() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "*"),
        ],
    )
}

/// POST /chat - Reply to a message and infer an optional task action.
///
/// Always 200 once the body parses; upstream failures are reported in `response`.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id, tasks = req.tasks.len());

    let response = state.assistant.respond(&req).instrument(span).await;
    Json(response)
}
