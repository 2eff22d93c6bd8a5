use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket for one in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    seq: u64,
    job_id: String,
}

impl RequestToken {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

/// Hands out strictly increasing tokens; only the newest one is current.
///
/// Nothing is cancelled. Callers still await every request and ask
/// [`RequestTracker::is_current`] before applying a result.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, job_id: &str) -> RequestToken {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestToken {
            seq,
            job_id: job_id.to_string(),
        }
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.seq
    }

    /// Sequence number of the most recent token, 0 before the first one.
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
