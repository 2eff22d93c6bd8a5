pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::ClientConfig;
pub use self::core::{
    client::MatchClient,
    session::{SearchOutcome, SearchSession, SelectedJob},
};
pub use domain::candidate::Candidate;
pub use domain::model::{HealthStatus, MatchEntry, MatchRequest, MatchResponse};
pub use utils::error::{MatchError, Result};
