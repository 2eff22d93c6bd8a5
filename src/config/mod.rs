#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};

pub const BASE_URL_ENV: &str = "RESUME_MATCH_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_USER_AGENT: &str = concat!("resume-match/", env!("CARGO_PKG_VERSION"));
pub const MAX_TIMEOUT_SECONDS: u64 = 3600;

/// Raw value of `RESUME_MATCH_API_URL`, if set.
pub fn env_base_url() -> Option<String> {
    std::env::var(BASE_URL_ENV).ok()
}

/// Everything the HTTP client needs, handed to it explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` leaves hang behavior to the transport.
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads `RESUME_MATCH_API_URL` once; unset or blank means the loopback default.
    pub fn from_env() -> Self {
        Self::from_env_value(env_base_url())
    }

    pub fn from_env_value(value: Option<String>) -> Self {
        let mut config = Self::default();
        config.apply_base_url(value);
        config
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Blank values are ignored so an empty variable does not wipe a configured URL.
    pub fn apply_base_url(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
    }

    /// `{base_url}{path}` with a single slash between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }
        validate_non_empty_string("user_agent", &self.user_agent)?;
        Ok(())
    }
}
