//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults,
//! so `cargo run --bin api` works out of the box. Only the capability
//! credential has no default: without `OPENAI_API_KEY` the extract endpoint
//! still works but every assessment fails with a capability error.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::cache::CachePolicy;

/// Environment variable names. Public so tests can set and clear them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_LLM_TIMEOUT_SECS: &str = "LLM_TIMEOUT_SECS";
pub const ENV_CACHE_MAX_ENTRIES: &str = "CACHE_MAX_ENTRIES";
pub const ENV_CACHE_TTL_SECS: &str = "CACHE_TTL_SECS";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    openai_api_key: Option<String>,
    openai_base_url: String,
    openai_model: String,
    fetch_timeout: Duration,
    llm_timeout: Duration,
    cache_max_entries: Option<usize>,
    cache_ttl: Option<Duration>,
    log_format: LogFormat,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let openai_api_key = env::var(ENV_OPENAI_API_KEY)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let openai_base_url = env::var(ENV_OPENAI_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let openai_model =
            env::var(ENV_OPENAI_MODEL).unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string());

        let fetch_timeout = Duration::from_secs(
            parse_var::<u64>(ENV_FETCH_TIMEOUT_SECS)?.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
        );
        let llm_timeout = Duration::from_secs(
            parse_var::<u64>(ENV_LLM_TIMEOUT_SECS)?.unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),
        );
        let cache_max_entries = parse_var::<usize>(ENV_CACHE_MAX_ENTRIES)?;
        let cache_ttl = parse_var::<u64>(ENV_CACHE_TTL_SECS)?.map(Duration::from_secs);

        let log_format = match env::var(ENV_LOG_FORMAT) {
            Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            bind_addr,
            openai_api_key,
            openai_base_url,
            openai_model,
            fetch_timeout,
            llm_timeout,
            cache_max_entries,
            cache_ttl,
            log_format,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }
    /// Root of the OpenAI-compatible API, without a trailing slash.
    pub fn openai_base_url(&self) -> &str {
        &self.openai_base_url
    }
    pub fn openai_model(&self) -> &str {
        &self.openai_model
    }
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
    pub fn llm_timeout(&self) -> Duration {
        self.llm_timeout
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Eviction policy for the credibility cache. Unbounded unless configured.
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            max_entries: self.cache_max_entries,
            ttl: self.cache_ttl,
        }
    }
}

fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: name,
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
