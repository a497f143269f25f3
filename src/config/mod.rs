//! Configuration handling for the application.
//!
//! All configuration is read once at process start and carried in an
//! explicit [`Config`] value; no module re-reads the environment on its
//! own. The only hard requirement is the Gemini API key — everything
//! else has development defaults.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Keeping them public lets tests and
/// deployment tooling refer to them directly.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL_NAME: &str = "GEMINI_MODEL_NAME";
pub const ENV_GEMINI_API_BASE: &str = "GEMINI_API_BASE";
pub const ENV_GEMINI_SCHEMA_OUTPUT: &str = "GEMINI_SCHEMA_OUTPUT";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_SEARCH_API_BASE: &str = "SEARCH_API_BASE";
pub const ENV_NEWS_FEED_URL: &str = "NEWS_FEED_URL";

/// Default development values used when environment variables are absent.
const DEFAULT_GEMINI_MODEL_NAME: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_SEARCH_API_BASE: &str = "https://duckduckgo.com";
const DEFAULT_NEWS_FEED_URL: &str = "https://news.google.com/rss?hl=en-US&gl=US&ceid=US:en";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    gemini_api_key: String,
    gemini_model: String,
    gemini_api_base: String,
    schema_output: bool,
    bind_addr: String,
    search_api_base: String,
    news_feed_url: String,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        gemini_api_key: impl Into<String>,
        gemini_model: impl Into<String>,
        gemini_api_base: impl Into<String>,
        schema_output: bool,
        bind_addr: impl Into<String>,
        search_api_base: impl Into<String>,
        news_feed_url: impl Into<String>,
    ) -> Self {
        Self {
            gemini_api_key: gemini_api_key.into(),
            gemini_model: gemini_model.into(),
            gemini_api_base: gemini_api_base.into(),
            schema_output,
            bind_addr: bind_addr.into(),
            search_api_base: search_api_base.into(),
            news_feed_url: news_feed_url.into(),
        }
    }

    /// Load from environment variables, falling back to development
    /// defaults. Fails when the Gemini API key is absent — that is a
    /// startup-time configuration error, not something to discover on
    /// the first request.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = env::var(ENV_GEMINI_API_KEY)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar {
                name: ENV_GEMINI_API_KEY,
            })?;
        let gemini_model = env::var(ENV_GEMINI_MODEL_NAME)
            .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL_NAME.to_string());
        let gemini_api_base =
            env::var(ENV_GEMINI_API_BASE).unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string());
        // Schema-constrained output unless explicitly opted out; the
        // prompt-embedded fallback exists for runtimes that reject
        // response schemas.
        let schema_output = match env::var(ENV_GEMINI_SCHEMA_OUTPUT) {
            Ok(v) => !matches!(v.to_lowercase().as_str(), "0" | "false" | "off"),
            Err(_) => true,
        };
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let search_api_base =
            env::var(ENV_SEARCH_API_BASE).unwrap_or_else(|_| DEFAULT_SEARCH_API_BASE.to_string());
        let news_feed_url =
            env::var(ENV_NEWS_FEED_URL).unwrap_or_else(|_| DEFAULT_NEWS_FEED_URL.to_string());

        Ok(Self {
            gemini_api_key,
            gemini_model,
            gemini_api_base,
            schema_output,
            bind_addr,
            search_api_base,
            news_feed_url,
        })
    }

    /// API key passed to the Gemini endpoint.
    pub fn gemini_api_key(&self) -> &str {
        &self.gemini_api_key
    }
    /// Model name used for credibility analysis.
    pub fn gemini_model(&self) -> &str {
        &self.gemini_model
    }
    /// Base URL of the Gemini REST API.
    pub fn gemini_api_base(&self) -> &str {
        &self.gemini_api_base
    }
    /// Whether the model call is schema-constrained (true) or falls back
    /// to an example JSON object embedded in the prompt (false).
    pub fn schema_output(&self) -> bool {
        self.schema_output
    }
    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Base URL of the news-search provider.
    pub fn search_api_base(&self) -> &str {
        &self.search_api_base
    }
    /// RSS endpoint for the headline feed.
    pub fn news_feed_url(&self) -> &str {
        &self.news_feed_url
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    MissingVar { name: &'static str },
    /// Reserved for future validation failures.
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar { name } => {
                write!(f, "{} is not set; set it before starting the service", name)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
