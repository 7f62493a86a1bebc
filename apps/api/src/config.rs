use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    /// Models endpoint; override to route through a proxy.
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    /// Extra provider attempts on 429/5xx. 0 surfaces the first failure to the caller.
    pub llm_max_retries: u32,
    /// When set, plan dates follow the requested posting frequency instead of one per day.
    pub plan_frequency_aware_dates: bool,
    /// Upper bound for history listings.
    pub history_page_size: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_base: optional_env("GEMINI_API_BASE", crate::llm_client::GEMINI_API_BASE),
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            llm_max_retries: optional_env("LLM_MAX_RETRIES", "0")
                .parse::<u32>()
                .context("LLM_MAX_RETRIES must be a non-negative integer")?,
            plan_frequency_aware_dates: parse_flag(&optional_env(
                "PLAN_FREQUENCY_AWARE_DATES",
                "false",
            ))
            .context("PLAN_FREQUENCY_AWARE_DATES must be true or false")?,
            history_page_size: optional_env("HISTORY_PAGE_SIZE", "50")
                .parse::<i64>()
                .ok()
                .filter(|n| *n > 0)
                .context("HISTORY_PAGE_SIZE must be a positive integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
