//! Configuration management for the todo assistant.
//!
//! Configuration can be set via environment variables:
//! - `GROQ_API_KEY` - Optional. Provider credential. Without it every chat request
//!   answers with an error reply instead of failing at startup.
//! - `LLM_BASE_URL` - Optional. OpenAI-compatible base URL. Defaults to `https://api.groq.com/openai/v1`.
//! - `DEFAULT_MODEL` - Optional. The LLM model to use. Defaults to `llama-3.3-70b-versatile`.
//! - `LLM_TEMPERATURE` - Optional. Sampling temperature (0.0 - 2.0). Defaults to `0.7`.
//! - `LLM_MAX_TOKENS` - Optional. Completion token limit. Defaults to `150`.
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `CORS_MAX_AGE_SECS` - Optional. Preflight cache lifetime. Defaults to `3600`.

use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Upstream completion settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Provider API key (None = every request fails with an error reply)
    pub api_key: Option<String>,

    /// OpenAI-compatible base URL, without the `/chat/completions` suffix
    pub base_url: String,

    /// Model identifier sent upstream
    pub model: String,

    pub temperature: f32,

    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 150,
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Completion provider settings
    pub llm: LlmConfig,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// `Access-Control-Max-Age` for preflight responses, in seconds
    pub cors_max_age_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable does not parse
    /// or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let model = std::env::var("DEFAULT_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature: f32 = parse_env("LLM_TEMPERATURE", "0.7")?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue(
                "LLM_TEMPERATURE".to_string(),
                format!("{} is outside 0.0..=2.0", temperature),
            ));
        }

        let max_tokens: u32 = parse_env("LLM_MAX_TOKENS", "150")?;
        if max_tokens == 0 {
            return Err(ConfigError::InvalidValue(
                "LLM_MAX_TOKENS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_env("PORT", "8000")?;
        let cors_max_age_secs = parse_env("CORS_MAX_AGE_SECS", "3600")?;

        Ok(Self {
            llm: LlmConfig {
                api_key,
                base_url,
                model,
                temperature,
                max_tokens,
            },
            host,
            port,
            cors_max_age_secs,
        })
    }

    /// Create a config with default values (useful for testing).
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            llm: LlmConfig {
                api_key,
                ..LlmConfig::default()
            },
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_max_age_secs: 3600,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_env<T>(name: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e)))
}
