use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub job_id: String,
    pub job_description: String,
}

impl MatchRequest {
    pub fn new(job_id: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            job_description: job_description.into(),
        }
    }
}

/// Ranked matches for one job description, in the order the service sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub job_id: String,
    pub total_resumes_scanned: u64,
    pub top_matches: Vec<MatchEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub resume_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Reported as-is; the scale belongs to the service.
    pub match_score: f64,
    pub matched_sections: Vec<String>,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub llm_backend: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub job_description: String,
    /// Chunks are forwarded untouched; their layout is owned by the service's index.
    pub resume_chunks: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}
