//! Application configuration management
//!
//! Configuration is read from the environment once at startup, validated,
//! and passed into the components that need it. Nothing reads the
//! environment after this point.

use anyhow::{Context, Result};
use axum::http::HeaderValue;

/// Default OpenRouter API base URL
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model identifier sent upstream
const DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3.1:free";

/// Default server host
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port
const DEFAULT_PORT: u16 = 8000;

/// Default request timeout in seconds
///
/// The upstream call blocks the handling request for its full duration, so
/// an explicit timeout bounds how long an unresponsive provider can stall a
/// caller.
const DEFAULT_REQUEST_TIMEOUT: u64 = 90;

/// Default browser origin allowed by the CORS layer
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Application configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter bearer credential; may be empty, in which case the
    /// upstream call goes out unauthenticated and the provider rejects it
    pub openrouter_api_key: String,

    /// OpenRouter API base URL
    pub openrouter_base_url: String,

    /// Model identifier sent with every completion request
    pub model: String,

    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logging level
    pub log_level: String,

    /// Upstream request timeout in seconds
    pub request_timeout: u64,

    /// Single origin allowed to invoke the relay from a browser, parsed
    /// at load time so a bad value fails at startup rather than when the
    /// router is built
    pub cors_allow_origin: HeaderValue,
}

impl Config {
    /// Build configuration from a variable lookup function
    ///
    /// # Errors
    ///
    /// Returns error if a numeric variable is present but unparseable, or
    /// if the CORS origin is not a valid header value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {}", raw))?,
            None => DEFAULT_PORT,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("Invalid REQUEST_TIMEOUT value: {}", raw))?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let origin =
            lookup("CORS_ALLOW_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_allow_origin = origin
            .parse::<HeaderValue>()
            .with_context(|| format!("Invalid CORS_ALLOW_ORIGIN value: {}", origin))?;

        Ok(Config {
            openrouter_api_key: lookup("OPENROUTER_API_KEY").unwrap_or_default(),
            openrouter_base_url: lookup("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: lookup("DRAFT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            request_timeout,
            cors_allow_origin,
        })
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Whether a bearer credential is configured
    ///
    /// A missing key is not a startup error; the relay forwards requests
    /// anyway and surfaces the provider's rejection to the caller.
    pub fn api_key_configured(&self) -> bool {
        !self.openrouter_api_key.is_empty()
    }
}
