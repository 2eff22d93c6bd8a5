use crate::core::tracker::{RequestToken, RequestTracker};
use crate::domain::candidate::{normalize, Candidate};
use crate::domain::model::MatchResponse;
use crate::domain::ports::MatchService;
use crate::utils::error::Result;
use crate::utils::validation::validate_job_description;
use std::sync::{Mutex, MutexGuard};

/// Job id sent when the user searches without picking a job.
pub const ADHOC_JOB_ID: &str = "adhoc_job";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedJob {
    pub id: String,
    pub title: Option<String>,
}

impl SelectedJob {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// This search is the newest one; its results now back the session.
    Applied {
        seq: u64,
        candidates: Vec<Candidate>,
    },
    /// A newer search was issued while this one was in flight. Its result,
    /// success or failure, was dropped.
    Superseded { seq: u64 },
}

#[derive(Debug, Default)]
struct SessionState {
    applied_seq: u64,
    response: Option<MatchResponse>,
    candidates: Vec<Candidate>,
}

/// Caller side of the matching flow: checks input, picks the job id, and keeps
/// the results of the newest search only.
pub struct SearchSession<S: MatchService> {
    service: S,
    tracker: RequestTracker,
    state: Mutex<SessionState>,
}

impl<S: MatchService> SearchSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            tracker: RequestTracker::new(),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn search(
        &self,
        selected_job: Option<&SelectedJob>,
        job_description: &str,
    ) -> Result<SearchOutcome> {
        validate_job_description(job_description)?;

        let job_id = selected_job.map_or(ADHOC_JOB_ID, |job| job.id.as_str());
        let role = selected_job.and_then(|job| job.title.as_deref());
        let token = self.tracker.begin(job_id);
        tracing::debug!(seq = token.seq(), job_id, "Search issued");

        let result = self.service.run_resume_match(job_id, job_description).await;

        match result {
            Ok(response) => Ok(self.apply(&token, response, role)),
            Err(e) if !self.tracker.is_current(&token) => {
                tracing::debug!(seq = token.seq(), error = %e, "Dropping failure of stale search");
                Ok(SearchOutcome::Superseded { seq: token.seq() })
            }
            Err(e) => Err(e),
        }
    }

    fn apply(
        &self,
        token: &RequestToken,
        response: MatchResponse,
        role: Option<&str>,
    ) -> SearchOutcome {
        let mut state = self.lock_state();

        // Checked under the lock so a stale result cannot land after a newer one.
        if !self.tracker.is_current(token) || token.seq() <= state.applied_seq {
            tracing::debug!(
                seq = token.seq(),
                latest = self.tracker.latest(),
                job_id = token.job_id(),
                "Dropping stale search result"
            );
            return SearchOutcome::Superseded { seq: token.seq() };
        }

        let candidates = normalize(&response, role);
        tracing::info!(
            seq = token.seq(),
            job_id = token.job_id(),
            candidates = candidates.len(),
            "Matching complete"
        );

        state.applied_seq = token.seq();
        state.candidates = candidates.clone();
        state.response = Some(response);

        SearchOutcome::Applied {
            seq: token.seq(),
            candidates,
        }
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        self.lock_state().candidates.clone()
    }

    pub fn last_response(&self) -> Option<MatchResponse> {
        self.lock_state().response.clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        // State is replaced wholesale, so a poisoned guard still holds a consistent value.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
