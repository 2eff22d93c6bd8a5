use crate::config::ClientConfig;
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk client settings:
///
/// ```toml
/// [service]
/// base_url = "${MATCH_HOST}"
/// timeout_seconds = 30
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MatchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MatchError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Layers the file's values over `base`.
    pub fn apply_to(&self, base: ClientConfig) -> ClientConfig {
        let mut config = base;
        config.apply_base_url(self.service.base_url.clone());
        if let Some(timeout) = self.service.timeout_seconds {
            config.timeout_seconds = Some(timeout);
        }
        if let Some(agent) = &self.service.user_agent {
            config.user_agent = agent.clone();
        }
        config
    }

    pub fn client_config(&self) -> ClientConfig {
        self.apply_to(ClientConfig::default())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.client_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_service_section() {
        let toml_content = r#"
[service]
base_url = "https://match.example.com"
timeout_seconds = 15
user_agent = "dashboard/2.0"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let client = config.client_config();

        assert_eq!(client.base_url, "https://match.example.com");
        assert_eq!(client.timeout_seconds, Some(15));
        assert_eq!(client.user_agent, "dashboard/2.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.client_config(), ClientConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RESUME_MATCH_TEST_HOST", "http://10.0.0.7:8000");

        let toml_content = r#"
[service]
base_url = "${RESUME_MATCH_TEST_HOST}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.service.base_url.as_deref(),
            Some("http://10.0.0.7:8000")
        );

        std::env::remove_var("RESUME_MATCH_TEST_HOST");
    }

    #[test]
    fn test_unknown_variable_fails_validation() {
        let toml_content = r#"
[service]
base_url = "${RESUME_MATCH_SURELY_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[service\nbase_url = 1").unwrap_err();
        assert!(matches!(err, MatchError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[service]\nbase_url = \"http://localhost:9999\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.client_config().base_url, "http://localhost:9999");
    }
}
