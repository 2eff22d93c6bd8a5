use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    /// Non-2xx reply, or a 2xx body carrying the service's in-band error shape.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    #[error("Malformed response at `{path}`: {reason}")]
    MalformedResponse { path: String, reason: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for `{field}` ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Service,
    Network,
    Configuration,
    Input,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MatchError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        MatchError::MalformedResponse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MatchError::RequestFailed { .. } | MatchError::MalformedResponse { .. } => {
                ErrorCategory::Service
            }
            MatchError::Transport(_) => ErrorCategory::Network,
            MatchError::ConfigError { .. }
            | MatchError::InvalidConfigValueError { .. }
            | MatchError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MatchError::ValidationError { .. } => ErrorCategory::Input,
            MatchError::CsvError(_) | MatchError::IoError(_) | MatchError::SerializationError(_) => {
                ErrorCategory::Local
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MatchError::ValidationError { .. } => ErrorSeverity::Low,
            // 5xx and network hiccups are usually worth another try.
            MatchError::RequestFailed { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            MatchError::Transport(_) => ErrorSeverity::Medium,
            MatchError::RequestFailed { .. }
            | MatchError::MalformedResponse { .. }
            | MatchError::CsvError(_)
            | MatchError::SerializationError(_) => ErrorSeverity::High,
            MatchError::ConfigError { .. }
            | MatchError::InvalidConfigValueError { .. }
            | MatchError::MissingConfigError { .. }
            | MatchError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MatchError::RequestFailed { status, .. } if *status >= 500 => {
                "The matching service reported an internal failure; check its logs and try again"
            }
            MatchError::RequestFailed { .. } => {
                "Check the job id and job description sent to the matching service"
            }
            MatchError::MalformedResponse { .. } => {
                "The matching service answered with an unexpected shape; check that client and service versions agree"
            }
            MatchError::Transport(_) => {
                "Make sure the matching service is running and the base URL is reachable"
            }
            MatchError::ConfigError { .. }
            | MatchError::InvalidConfigValueError { .. }
            | MatchError::MissingConfigError { .. } => {
                "Fix the configuration file, RESUME_MATCH_API_URL or the command line flags"
            }
            MatchError::ValidationError { .. } => "Provide a non-empty job description",
            MatchError::IoError(_) => "Check that the file exists and is readable",
            MatchError::CsvError(_) | MatchError::SerializationError(_) => {
                "Try another output format"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MatchError::RequestFailed { message, .. } => format!("Matching failed: {}", message),
            MatchError::MalformedResponse { path, .. } => {
                format!("The matching service sent an invalid answer (at {})", path)
            }
            MatchError::Transport(_) => "Could not reach the matching service".to_string(),
            MatchError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
