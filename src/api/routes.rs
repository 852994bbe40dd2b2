//! Router, shared state and server startup.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::Method,
    routing::{get, options, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::chat;
use crate::assistant::Assistant;
use crate::config::Config;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub assistant: Assistant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let assistant = Assistant::new(config.llm.clone());
        Self { config, assistant }
    }
}

/// Allow every origin, method and header, with credentials.
///
/// Wildcards cannot be combined with credentials, so origin and request
/// headers are mirrored back instead.
fn cors_layer(max_age_secs: u64) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(max_age_secs))
}

/// Build the full router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.cors_max_age_secs);

    let api = Router::new()
        .route("/", get(chat::root))
        .route("/health", get(chat::health))
        .route("/chat", post(chat::chat))
        .layer(cors);

    // CorsLayer answers every OPTIONS request itself, so the explicit
    // `OPTIONS /chat` handler is merged in outside of it.
    Router::new()
        .route("/chat", options(chat::chat_options))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    if config.llm.api_key.is_none() {
        tracing::warn!("GROQ_API_KEY is not set; chat requests will return an error reply");
    }

    let state = Arc::new(AppState::new(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
