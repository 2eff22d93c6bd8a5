use crate::config::toml_config::TomlConfig;
use crate::config::{env_base_url, ClientConfig};
use crate::core::report::ReportFormat;
use crate::utils::error::{MatchError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "resume-match")]
#[command(about = "Rank stored resumes against a job description")]
pub struct CliConfig {
    /// TOML file with a [service] section
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Matching service base URL (overrides the file and RESUME_MATCH_API_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds; no timeout when omitted
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log to stderr as JSON lines instead of compact text")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run a resume match
    Match {
        /// Job identifier; `adhoc_job` when omitted
        #[arg(long)]
        job_id: Option<String>,

        /// Title shown as the candidates' role
        #[arg(long)]
        role: Option<String>,

        #[arg(long, conflicts_with = "job_description_file")]
        job_description: Option<String>,

        #[arg(long)]
        job_description_file: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Check that the service is up
    Health,
    /// Ask the service to explain a match for raw resume chunks
    Explain {
        #[arg(long)]
        job_description: String,

        /// JSON file holding an array of resume chunks
        #[arg(long)]
        chunks_file: PathBuf,
    },
}

impl CliConfig {
    /// Defaults, then the TOML file, then the environment, then flags.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.client_config(),
            None => ClientConfig::default(),
        };

        config.apply_base_url(env_base_url());
        config.apply_base_url(self.base_url.clone());
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = Some(timeout);
        }

        Ok(config)
    }
}

pub fn read_job_description(inline: Option<&str>, file: Option<&PathBuf>) -> Result<String> {
    match (inline, file) {
        (Some(text), _) => Ok(text.to_string()),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (None, None) => Err(MatchError::MissingConfigError {
            field: "--job-description or --job-description-file".to_string(),
        }),
    }
}

pub fn read_chunks(path: &PathBuf) -> Result<Vec<serde_json::Value>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
