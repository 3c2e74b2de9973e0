use std::time::Duration;

use anyhow::{Context, Result};

use crate::dashboard::FanOut;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables (and `.env` if present).
/// Every variable has a default; malformed values are startup errors.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub fan_out: FanOut,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("SCREENER_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match lookup("SCREENER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("SCREENER_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let fan_out = match lookup("SCREENER_RANKING_FANOUT") {
            Some(raw) => raw
                .parse::<FanOut>()
                .map_err(anyhow::Error::msg)
                .context("SCREENER_RANKING_FANOUT must be 'sequential' or 'concurrent'")?,
            None => FanOut::default(),
        };

        Ok(Config {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            fan_out,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.fan_out, FanOut::Sequential);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SCREENER_API_URL", "https://screener.internal/api/"),
            ("SCREENER_TIMEOUT_SECS", "5"),
            ("SCREENER_RANKING_FANOUT", "concurrent"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://screener.internal/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.fan_out, FanOut::Concurrent);
        assert_eq!(config.rust_log, "debug");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("SCREENER_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("SCREENER_RANKING_FANOUT", "sideways")]).is_err());
    }
}
