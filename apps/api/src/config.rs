use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Gemini's OpenAI-compatible surface.
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
const DEFAULT_PORT: u16 = 8080;

/// Application configuration loaded from environment variables.
///
/// The API key is deliberately optional: a missing or bad key only shows up as
/// a failed upstream call at request time.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let llm_timeout_secs = match lookup("LLM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };
        if llm_timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            llm_api_key: lookup("LLM_API_KEY")
                .or_else(|| lookup("GEMINI_API_KEY"))
                .unwrap_or_default(),
            llm_base_url: lookup("LLM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            port: match lookup("PORT") {
                Some(raw) => raw
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => DEFAULT_PORT,
            },
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.llm_api_key, "");
        assert_eq!(config.llm_base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_gemini_key_is_fallback() {
        let config = config_from(&[("GEMINI_API_KEY", "g-key")]).unwrap();
        assert_eq!(config.llm_api_key, "g-key");

        let config = config_from(&[("GEMINI_API_KEY", "g-key"), ("LLM_API_KEY", "l-key")]).unwrap();
        assert_eq!(config.llm_api_key, "l-key");
    }

    #[test]
    fn test_overrides_are_read() {
        let config = config_from(&[
            ("LLM_BASE_URL", "http://localhost:11434/v1"),
            ("LLM_TIMEOUT_SECS", "15"),
            ("PORT", "3001"),
        ])
        .unwrap();
        assert_eq!(config.llm_base_url, "http://localhost:11434/v1");
        assert_eq!(config.llm_timeout, Duration::from_secs(15));
        assert_eq!(config.port, 3001);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(config_from(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn test_zero_or_garbage_timeout_is_rejected() {
        assert!(config_from(&[("LLM_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("LLM_TIMEOUT_SECS", "soon")]).is_err());
    }
}
