//! Environment-driven configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Added typewriter delay and session TTL settings
//! - 1.0.0: Initial release

use anyhow::Result;
use std::env;
use std::time::Duration;

/// Model used when `OPENAI_MODEL` is not set
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Address the web server binds to when `BIND_ADDRESS` is not set
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8501";
/// Stylesheet injected into every rendered page
pub const DEFAULT_STYLESHEET_PATH: &str = "styles.css";
/// Per-word delay of the typewriter animation
pub const DEFAULT_TYPEWRITER_DELAY_MS: u64 = 50;
/// Idle sessions older than this are swept
pub const DEFAULT_SESSION_TTL_MINUTES: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub log_level: String,
    pub bind_address: String,
    pub stylesheet_path: String,
    pub typewriter_delay_ms: u64,
    pub session_ttl_minutes: u64,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first so values from `.env` are visible here.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY environment variable is required"))?;

        let typewriter_delay_ms = parse_or_default(
            &lookup,
            "TYPEWRITER_DELAY_MS",
            DEFAULT_TYPEWRITER_DELAY_MS,
        )?;
        let session_ttl_minutes = parse_or_default(
            &lookup,
            "SESSION_TTL_MINUTES",
            DEFAULT_SESSION_TTL_MINUTES,
        )?;

        Ok(Self {
            openai_api_key,
            openai_model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            stylesheet_path: lookup("STYLESHEET_PATH")
                .unwrap_or_else(|| DEFAULT_STYLESHEET_PATH.to_string()),
            typewriter_delay_ms,
            session_ttl_minutes,
        })
    }

    pub fn typewriter_delay(&self) -> Duration {
        Duration::from_millis(self.typewriter_delay_ms)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_minutes.saturating_mul(60))
    }
}

fn parse_or_default<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {key} ({raw}): {e}")),
        None => Ok(default),
    }
}
