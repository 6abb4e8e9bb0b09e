use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{ApiStyle, Credential, CredentialChain};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_PROPOSAL_AUTHOR: &str = "Rivaldo Silveira";
const DEFAULT_LISTING_SITE_DOMAIN: &str = "99freelas.com.br";
const DEFAULT_LISTING_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Process-wide default credential.
    pub openai_api_key: Option<Credential>,
    /// Baseline credential used when neither the request nor the default has one.
    pub default_openai_api_key: Option<Credential>,
    pub openai_base_url: String,
    /// `None` means "probe the provider at startup".
    pub openai_api_style: Option<ApiStyle>,
    pub llm_timeout: Duration,
    pub proposal_author: String,
    pub listing_site_domain: String,
    pub listing_fetch_timeout: Duration,
    pub listing_user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            openai_api_key: optional_env("OPENAI_API_KEY").map(Credential::new),
            default_openai_api_key: optional_env("DEFAULT_OPENAI_API_KEY").map(Credential::new),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_api_style: parse_api_style(optional_env("OPENAI_API_STYLE").as_deref())?,
            llm_timeout: Duration::from_secs(secs_env("LLM_TIMEOUT_SECS", 120)?),
            proposal_author: optional_env("PROPOSAL_AUTHOR")
                .unwrap_or_else(|| DEFAULT_PROPOSAL_AUTHOR.to_string()),
            listing_site_domain: optional_env("LISTING_SITE_DOMAIN")
                .unwrap_or_else(|| DEFAULT_LISTING_SITE_DOMAIN.to_string()),
            listing_fetch_timeout: Duration::from_secs(secs_env("LISTING_FETCH_TIMEOUT_SECS", 10)?),
            listing_user_agent: optional_env("LISTING_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_LISTING_USER_AGENT.to_string()),
        })
    }

    pub fn credential_chain(&self) -> CredentialChain {
        CredentialChain {
            process_default: self.openai_api_key.clone(),
            baseline: self.default_openai_api_key.clone(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn secs_env(key: &str, default: u64) -> Result<u64> {
    match optional_env(key) {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of seconds")),
        None => Ok(default),
    }
}

fn parse_api_style(raw: Option<&str>) -> Result<Option<ApiStyle>> {
    match raw.map(|s| s.to_ascii_lowercase()).as_deref() {
        None | Some("auto") => Ok(None),
        Some("responses") => Ok(Some(ApiStyle::Responses)),
        Some("chat") | Some("chat_completions") => Ok(Some(ApiStyle::ChatCompletions)),
        Some(other) => anyhow::bail!(
            "OPENAI_API_STYLE must be one of auto, responses, chat (got '{other}')"
        ),
    }
}
