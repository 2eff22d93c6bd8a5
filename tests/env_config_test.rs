use anyhow::Result;
use resume_match::config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
use resume_match::core::client::MATCH_PATH;
use resume_match::MatchClient;

/// Every case lives in one test: the variable is process-wide and this binary
/// runs tests in parallel.
#[test]
fn test_base_url_from_environment() -> Result<()> {
    std::env::remove_var(BASE_URL_ENV);
    let client = MatchClient::from_env()?;
    assert_eq!(
        client.config().endpoint(MATCH_PATH),
        "http://127.0.0.1:8000/match"
    );

    std::env::set_var(BASE_URL_ENV, "https://match.example.com/");
    let client = MatchClient::from_env()?;
    assert_eq!(
        client.config().endpoint(MATCH_PATH),
        "https://match.example.com/match"
    );
    assert_eq!(ClientConfig::from_env().base_url, "https://match.example.com/");

    std::env::set_var(BASE_URL_ENV, "   ");
    let client = MatchClient::from_env()?;
    assert_eq!(client.config().base_url, DEFAULT_BASE_URL);
    assert_eq!(
        client.config().endpoint(MATCH_PATH),
        "http://127.0.0.1:8000/match"
    );

    std::env::remove_var(BASE_URL_ENV);
    Ok(())
}
