use anyhow::{bail, Context, Result};

use crate::chat::speech::SpeechCapabilities;
use crate::skill_gap::matcher::MatchMode;

const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_CHAT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_CHAT_MODEL: &str = "qwen/qwen2.5-vl-3b-instruct:free";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent means profiles and applications are kept in memory.
    pub database_url: Option<String>,
    pub identity_api_key: String,
    pub identity_base_url: String,
    pub oauth_request_uri: String,
    pub resume_service_url: String,
    pub bookmark_service_url: String,
    pub resource_service_url: String,
    pub chat_api_url: String,
    pub chat_api_key: String,
    pub chat_model: String,
    pub speech: SpeechCapabilities,
    pub match_mode: MatchMode,
    pub upstream_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            identity_api_key: require_env("IDENTITY_API_KEY")?,
            identity_base_url: env_or("IDENTITY_BASE_URL", DEFAULT_IDENTITY_BASE_URL),
            oauth_request_uri: env_or("OAUTH_REQUEST_URI", "http://localhost"),
            resume_service_url: env_or("RESUME_SERVICE_URL", "http://localhost:5002"),
            bookmark_service_url: env_or("BOOKMARK_SERVICE_URL", "http://127.0.0.1:5001"),
            resource_service_url: env_or("RESOURCE_SERVICE_URL", "http://127.0.0.1:5003"),
            chat_api_url: env_or("CHAT_API_URL", DEFAULT_CHAT_API_URL),
            chat_api_key: require_env("CHAT_API_KEY")?,
            chat_model: env_or("CHAT_MODEL", DEFAULT_CHAT_MODEL),
            speech: SpeechCapabilities {
                recognition: parse_bool("SPEECH_RECOGNITION", true)?,
                synthesis: parse_bool("SPEECH_SYNTHESIS", true)?,
            },
            match_mode: env_or("SKILL_MATCH_MODE", "token")
                .parse::<MatchMode>()
                .map_err(anyhow::Error::msg)
                .context("SKILL_MATCH_MODE must be 'token' or 'substring'")?,
            upstream_timeout_secs: env_or("UPSTREAM_TIMEOUT_SECS", "60")
                .parse::<u64>()
                .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_bool(key: &str, default: bool) -> Result<bool> {
    match optional_env(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => bail!("{key} must be a boolean, got '{other}'"),
        },
    }
}
