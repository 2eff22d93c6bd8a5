//! Dashboard view of a match entry.

use crate::domain::model::{MatchEntry, MatchResponse};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_ROLE: &str = "Unknown Role";
pub const MATCHED_STATUS: &str = "matched";
pub const SUMMARY_CHARS: usize = 160;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub role: String,
    pub category: Option<String>,
    pub match_score: f64,
    pub summary: String,
    pub skills: Vec<String>,
    pub ai_explanation: String,
    pub status: String,
}

impl Candidate {
    /// `index` is the zero-based rank of the entry in the service's list.
    pub fn from_entry(entry: &MatchEntry, index: usize, role: Option<&str>) -> Self {
        Self {
            id: entry.resume_id.clone(),
            name: format!("Candidate {}", index + 1),
            role: role.unwrap_or(UNKNOWN_ROLE).to_string(),
            category: entry.category.clone(),
            match_score: entry.match_score,
            summary: summarize(&entry.explanation),
            skills: entry.matched_sections.clone(),
            ai_explanation: entry.explanation.clone(),
            status: MATCHED_STATUS.to_string(),
        }
    }
}

/// Keeps the service's ranking; nothing is re-sorted or filtered.
pub fn normalize(response: &MatchResponse, role: Option<&str>) -> Vec<Candidate> {
    response
        .top_matches
        .iter()
        .enumerate()
        .map(|(index, entry)| Candidate::from_entry(entry, index, role))
        .collect()
}

fn summarize(explanation: &str) -> String {
    // Cut on char boundaries, explanations are LLM text and often non-ASCII.
    let head: String = explanation.chars().take(SUMMARY_CHARS).collect();
    format!("{}...", head)
}
