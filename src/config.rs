//! Client Configuration
//!
//! Resolved at build time; the bundle has no runtime environment to read.

use std::str::FromStr;

use tracing::Level;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001";
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the remote task store, without trailing slash
    pub base_url: String,
    pub log_level: Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl ClientConfig {
    /// Read `TODO_API_BASE_URL` and `TODO_LOG_LEVEL` as set when the bundle was built
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("TODO_API_BASE_URL"), option_env!("TODO_LOG_LEVEL"))
    }

    pub fn from_values(base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string();
        let log_level = log_level
            .and_then(|level| Level::from_str(level.trim()).ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);
        Self { base_url, log_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(ClientConfig::from_values(None, None), ClientConfig::default());
    }

    #[test]
    fn test_overrides_are_normalized() {
        let config = ClientConfig::from_values(Some(" https://todo.example.com/ "), Some("debug"));
        assert_eq!(config.base_url, "https://todo.example.com");
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ClientConfig::from_values(Some("   "), Some("chatty"));
        assert_eq!(config, ClientConfig::default());
    }
}
