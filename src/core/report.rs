use crate::domain::model::MatchResponse;
use crate::utils::error::{MatchError, Result};
use std::fmt::Write as _;

pub const CSV_HEADER: [&str; 5] = [
    "resume_id",
    "category",
    "match_score",
    "matched_sections",
    "explanation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render(response: &MatchResponse, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(response)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        ReportFormat::Csv => render_csv(response),
    }
}

pub fn render_text(response: &MatchResponse) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "Job {}: {} matches from {} resumes scanned",
        response.job_id,
        response.top_matches.len(),
        response.total_resumes_scanned
    );

    for (rank, entry) in response.top_matches.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n#{} {} [{}] score {}",
            rank + 1,
            entry.resume_id,
            entry.category.as_deref().unwrap_or("-"),
            entry.match_score
        );
        if !entry.matched_sections.is_empty() {
            let _ = writeln!(out, "   sections: {}", entry.matched_sections.join(", "));
        }
        for line in entry.explanation.lines().filter(|l| !l.trim().is_empty()) {
            let _ = writeln!(out, "   {}", line.trim_end());
        }
    }

    out
}

pub fn render_csv(response: &MatchResponse) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for entry in &response.top_matches {
        let score = entry.match_score.to_string();
        let sections = entry.matched_sections.join(";");
        writer.write_record([
            entry.resume_id.as_str(),
            entry.category.as_deref().unwrap_or(""),
            score.as_str(),
            sections.as_str(),
            entry.explanation.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| MatchError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| MatchError::ValidationError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}
