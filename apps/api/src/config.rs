use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
/// 5 MB, the largest resume upload accepted.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to everything that needs it through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Missing key is not fatal: analysis calls fail with a descriptive error instead.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub llm_timeout: Duration,
    pub max_upload_bytes: usize,
    /// Where uploads are staged during extraction; the system temp dir when unset.
    pub upload_tmp_dir: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_base_url: non_empty("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            llm_timeout: Duration::from_secs(
                parse_or(non_empty("LLM_TIMEOUT_SECS"), DEFAULT_LLM_TIMEOUT_SECS)
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            max_upload_bytes: parse_or(non_empty("MAX_UPLOAD_BYTES"), DEFAULT_MAX_UPLOAD_BYTES)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            upload_tmp_dir: non_empty("UPLOAD_TMP_DIR").map(PathBuf::from),
            port: parse_or(non_empty("PORT"), 5000)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => Ok(value.trim().parse::<T>()?),
        None => Ok(default),
    }
}
