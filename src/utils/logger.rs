use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins; otherwise this crate logs at info, or debug with `--verbose`.
fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "resume_match=debug,info"
    } else {
        "resume_match=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Human-readable lines on stderr, so stdout carries only the report.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Backs `--json-logs`: one JSON object per event on stderr, with the
/// request fields (`job_id`, `seq`, `matches`) as structured keys for a log
/// collector sitting next to the dashboard.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .flatten_event(true),
        )
        .init();
}
