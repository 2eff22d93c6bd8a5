use crate::domain::model::MatchResponse;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that can answer a match request. The HTTP client is the real one;
/// sessions only see this trait.
#[async_trait]
pub trait MatchService: Send + Sync {
    async fn run_resume_match(&self, job_id: &str, job_description: &str) -> Result<MatchResponse>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn user_agent(&self) -> &str;
}
