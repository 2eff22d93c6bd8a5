use clap::Parser;
use resume_match::config::cli::{read_chunks, read_job_description, Command};
use resume_match::core::report;
use resume_match::utils::error::ErrorSeverity;
use resume_match::utils::{logger, validation::Validate};
use resume_match::{CliConfig, MatchClient, MatchError, SearchOutcome, SearchSession, SelectedJob};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> Result<(), MatchError> {
    let config = cli.client_config()?;
    config.validate()?;
    tracing::info!("Using matching service at {}", config.base_url);

    let client = MatchClient::new(config)?;

    match cli.command {
        Command::Match {
            job_id,
            role,
            job_description,
            job_description_file,
            format,
        } => {
            let description =
                read_job_description(job_description.as_deref(), job_description_file.as_ref())?;
            let selected = job_id.map(|id| {
                let job = SelectedJob::new(id);
                match role {
                    Some(title) => job.with_title(title),
                    None => job,
                }
            });

            let session = SearchSession::new(client);
            match session.search(selected.as_ref(), &description).await? {
                SearchOutcome::Applied { candidates, .. } => {
                    tracing::info!("✅ Found {} matching candidates", candidates.len());
                }
                SearchOutcome::Superseded { seq } => {
                    tracing::warn!("Search {} was superseded", seq);
                }
            }

            if let Some(response) = session.last_response() {
                print!("{}", report::render(&response, format)?);
            }
        }
        Command::Health => {
            let health = client.health().await?;
            println!("status: {}", health.status);
            println!("llm_backend: {}", health.llm_backend);
            if !health.is_ok() {
                return Err(MatchError::RequestFailed {
                    status: 200,
                    message: format!("Service reports status `{}`", health.status),
                });
            }
        }
        Command::Explain {
            job_description,
            chunks_file,
        } => {
            let chunks = read_chunks(&chunks_file)?;
            let explanation = client.explain_match(&job_description, chunks).await?;
            println!("{}", explanation);
        }
    }

    Ok(())
}
