// ABOUTME: Runtime configuration loaded from environment variables
// ABOUTME: Typed Config with documented defaults for API, timeouts, and session polling

pub mod constants;

use std::env;
use std::num::ParseIntError;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:4100";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_POLL_SECS: u64 = 60;
pub const DEFAULT_SESSION_PROBE_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid integer value for {0}: {1}")]
    InvalidInteger(&'static str, ParseIntError),
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    pub http_timeout_secs: u64,
    pub session_poll_secs: u64,
    pub session_probe_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env::var(constants::OPSDESK_API_URL)
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }

        let api_token = env::var(constants::OPSDESK_API_TOKEN)
            .ok()
            .filter(|t| !t.trim().is_empty());

        let http_timeout_secs = parse_secs(
            constants::OPSDESK_HTTP_TIMEOUT_SECS,
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;
        let session_poll_secs = parse_secs(
            constants::OPSDESK_SESSION_POLL_SECS,
            DEFAULT_SESSION_POLL_SECS,
        )?;
        let session_probe_timeout_secs = parse_secs(
            constants::OPSDESK_SESSION_PROBE_TIMEOUT_SECS,
            DEFAULT_SESSION_PROBE_TIMEOUT_SECS,
        )?;

        Ok(Config {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token,
            http_timeout_secs,
            session_poll_secs,
            session_probe_timeout_secs,
        })
    }
}

fn parse_secs(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidInteger(var, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_unset() {
        // Runs against whatever the process env happens to be, so only
        // exercise the pure parsing helper with a variable we control.
        std::env::remove_var("OPSDESK_TEST_SECS");
        assert_eq!(parse_secs("OPSDESK_TEST_SECS", 42).unwrap(), 42);

        std::env::set_var("OPSDESK_TEST_SECS", "15");
        assert_eq!(parse_secs("OPSDESK_TEST_SECS", 42).unwrap(), 15);

        std::env::set_var("OPSDESK_TEST_SECS", "not-a-number");
        assert!(parse_secs("OPSDESK_TEST_SECS", 42).is_err());
        std::env::remove_var("OPSDESK_TEST_SECS");
    }
}
