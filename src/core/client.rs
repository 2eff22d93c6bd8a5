use crate::config::ClientConfig;
use crate::core::schema;
use crate::domain::model::{ExplainRequest, HealthStatus, MatchRequest, MatchResponse};
use crate::domain::ports::{ConfigProvider, MatchService};
use crate::utils::error::{MatchError, Result};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

pub const MATCH_PATH: &str = "/match";
pub const HEALTH_PATH: &str = "/health";
pub const EXPLAIN_PATH: &str = "/explain-match";

pub const MATCH_FAILED: &str = "Failed to run resume match";
pub const HEALTH_FAILED: &str = "Failed to check service health";
pub const EXPLAIN_FAILED: &str = "Failed to explain match";

/// HTTP client for the matching service.
///
/// Holds no per-request state: every call builds its own request and owns its
/// response, so clones can be used from concurrent tasks freely.
#[derive(Debug, Clone)]
pub struct MatchClient {
    client: Client,
    config: ClientConfig,
}

impl MatchClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent().to_string());
        if let Some(seconds) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POSTs `{job_id, job_description}` to `/match` and returns the validated ranking.
    ///
    /// No retries. A non-2xx status fails with [`MatchError::RequestFailed`]
    /// carrying the response text, or [`MATCH_FAILED`] when the body is empty.
    pub async fn run_resume_match(
        &self,
        job_id: &str,
        job_description: &str,
    ) -> Result<MatchResponse> {
        let url = self.config.endpoint(MATCH_PATH);
        let request = MatchRequest::new(job_id, job_description);

        tracing::debug!(
            job_id,
            description_len = job_description.len(),
            "POST {}",
            url
        );
        let response = self.client.post(&url).json(&request).send().await?;

        let value = Self::into_json(response, MATCH_FAILED).await?;
        let parsed = schema::match_response(&value)?;

        tracing::debug!(
            job_id = %parsed.job_id,
            scanned = parsed.total_resumes_scanned,
            matches = parsed.top_matches.len(),
            "Match completed"
        );
        Ok(parsed)
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.config.endpoint(HEALTH_PATH);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let value = Self::into_json(response, HEALTH_FAILED).await?;
        schema::health_status(&value)
    }

    /// Asks the service for an explanation of how `resume_chunks` fit the description.
    pub async fn explain_match(
        &self,
        job_description: &str,
        resume_chunks: Vec<Value>,
    ) -> Result<String> {
        let url = self.config.endpoint(EXPLAIN_PATH);
        let request = ExplainRequest {
            job_description: job_description.to_string(),
            resume_chunks,
        };

        tracing::debug!(chunks = request.resume_chunks.len(), "POST {}", url);
        let response = self.client.post(&url).json(&request).send().await?;

        let value = Self::into_json(response, EXPLAIN_FAILED).await?;
        let explained = schema::explain_response(&value)?;
        Ok(explained.explanation)
    }

    /// Status check, body decode and in-band error detection shared by every endpoint.
    ///
    /// A connection dropped while the error body is read surfaces as
    /// [`MatchError::Transport`], not as the fallback message.
    async fn into_json(response: Response, fallback: &str) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            tracing::warn!("Service returned {}: {}", status, text);
            return Err(MatchError::RequestFailed {
                status: status.as_u16(),
                message: if text.is_empty() {
                    fallback.to_string()
                } else {
                    text
                },
            });
        }

        let body = response.bytes().await?;
        let value = schema::parse_json(&body)?;

        if let Some(message) = schema::in_band_error(&value) {
            tracing::warn!("Service reported an error with status {}: {}", status, message);
            return Err(MatchError::RequestFailed {
                status: status.as_u16(),
                message: if message.is_empty() {
                    fallback.to_string()
                } else {
                    message
                },
            });
        }

        Ok(value)
    }
}

#[async_trait::async_trait]
impl MatchService for MatchClient {
    async fn run_resume_match(
        &self,
        job_id: &str,
        job_description: &str,
    ) -> Result<MatchResponse> {
        MatchClient::run_resume_match(self, job_id, job_description).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> MatchClient {
        MatchClient::new(ClientConfig::new(server.base_url())).unwrap()
    }

    fn sample_body() -> Value {
        json!({
            "job_id": "j1",
            "total_resumes_scanned": 3,
            "top_matches": [{
                "resume_id": "r1",
                "match_score": 8.5,
                "matched_sections": ["skills"],
                "explanation": "strong fit"
            }]
        })
    }

    #[tokio::test]
    async fn test_posts_request_verbatim() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/match")
                .header("content-type", "application/json")
                .json_body(json!({
                    "job_id": "adhoc_job",
                    "job_description": "  Senior Rust engineer\nTokio, Axum  "
                }));
            then.status(200).json_body(sample_body());
        });

        let client = client_for(&server);
        client
            .run_resume_match("adhoc_job", "  Senior Rust engineer\nTokio, Axum  ")
            .await
            .unwrap();

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_success_deep_equals_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/match");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(sample_body());
        });

        let response = client_for(&server)
            .run_resume_match("j1", "rust")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(serde_json::to_value(&response).unwrap(), sample_body());
    }

    #[tokio::test]
    async fn test_error_status_carries_body_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/match");
            then.status(500).body("internal error");
        });

        let err = client_for(&server)
            .run_resume_match("j1", "rust")
            .await
            .unwrap_err();

        assert!(matches!(err, MatchError::RequestFailed { status: 500, .. }));
        assert_eq!(err.to_string(), "internal error");
    }

    #[tokio::test]
    async fn test_empty_error_body_uses_fallback() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/match");
            then.status(400);
        });

        let err = client_for(&server)
            .run_resume_match("j1", "rust")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to run resume match");
    }

    #[tokio::test]
    async fn test_truncated_error_body_is_transport_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Announces 100 bytes of body, sends 5, then hangs up.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\n\r\nshort")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = MatchClient::new(ClientConfig::new(format!("http://{}", addr))).unwrap();
        let err = client.run_resume_match("j1", "rust").await.unwrap_err();

        assert!(matches!(err, MatchError::Transport(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_in_band_error_is_request_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/match");
            then.status(200)
                .json_body(json!({"status": "error", "message": "vector index missing"}));
        });

        let err = client_for(&server)
            .run_resume_match("j1", "rust")
            .await
            .unwrap_err();

        assert!(matches!(err, MatchError::RequestFailed { status: 200, .. }));
        assert_eq!(err.to_string(), "vector index missing");
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/match");
            then.status(200).json_body(json!({"job_id": "j1", "top_matches": "none"}));
        });

        let err = client_for(&server)
            .run_resume_match("j1", "rust")
            .await
            .unwrap_err();

        assert!(matches!(err, MatchError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) is closed on test machines.
        let client = MatchClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();

        let err = client.run_resume_match("j1", "rust").await.unwrap_err();
        assert!(matches!(err, MatchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200)
                .json_body(json!({"status": "ok", "llm_backend": "ollama"}));
        });

        let health = client_for(&server).health().await.unwrap();

        api_mock.assert();
        assert!(health.is_ok());
        assert_eq!(health.llm_backend, "ollama");
    }

    #[tokio::test]
    async fn test_explain_match() {
        let server = MockServer::start();
        let chunks = vec![json!({"text": "Built Kafka pipelines", "metadata": {"section": "experience"}})];
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/explain-match").json_body(json!({
                "job_description": "Streaming engineer",
                "resume_chunks": [{"text": "Built Kafka pipelines", "metadata": {"section": "experience"}}]
            }));
            then.status(200)
                .json_body(json!({"explanation": "Fit:\n- Kafka experience"}));
        });

        let explanation = client_for(&server)
            .explain_match("Streaming engineer", chunks)
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(explanation, "Fit:\n- Kafka experience");
    }

    #[tokio::test]
    async fn test_explain_failure_fallback() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/explain-match");
            then.status(503);
        });

        let err = client_for(&server)
            .explain_match("x", vec![])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to explain match");
    }
}
