//! Structural checks on decoded service payloads.
//!
//! Bodies are parsed into [`serde_json::Value`] first and walked here, so a
//! bad shape is reported with the JSON path that broke instead of a serde
//! message about some column offset. Only types are checked; score ranges are
//! the service's business.

use crate::domain::model::{ExplainResponse, HealthStatus, MatchEntry, MatchResponse};
use crate::utils::error::{MatchError, Result};
use serde_json::{Map, Value};

pub fn health_status(value: &Value) -> Result<HealthStatus> {
    let obj = object(value, "$")?;
    Ok(HealthStatus {
        status: string_field(obj, "$", "status")?,
        llm_backend: string_field(obj, "$", "llm_backend")?,
    })
}

pub fn explain_response(value: &Value) -> Result<ExplainResponse> {
    let obj = object(value, "$")?;
    Ok(ExplainResponse {
        explanation: string_field(obj, "$", "explanation")?,
    })
}

/// The service answers internal failures with `200 {"status":"error","message":..}`.
pub fn in_band_error(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    if obj.get("status").and_then(Value::as_str) != Some("error") {
        return None;
    }
    Some(
        obj.get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    )
}

pub fn parse_json(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body)
        .map_err(|e| MatchError::malformed("$", format!("body is not valid JSON: {}", e)))
}

pub fn match_response(value: &Value) -> Result<MatchResponse> {
    let obj = object(value, "$")?;

    let job_id = string_field(obj, "$", "job_id")?;
    let total_resumes_scanned = match obj.get("total_resumes_scanned") {
        Some(v) => v.as_u64().ok_or_else(|| {
            MatchError::malformed(
                "total_resumes_scanned",
                format!("expected a non-negative integer, found {}", describe(v)),
            )
        })?,
        None => return Err(missing("total_resumes_scanned")),
    };

    let matches = match obj.get("top_matches") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(MatchError::malformed(
                "top_matches",
                format!("expected an array, found {}", describe(other)),
            ))
        }
        None => return Err(missing("top_matches")),
    };

    let top_matches = matches
        .iter()
        .enumerate()
        .map(|(i, item)| match_entry(item, &format!("top_matches[{}]", i)))
        .collect::<Result<Vec<_>>>()?;

    Ok(MatchResponse {
        job_id,
        total_resumes_scanned,
        top_matches,
    })
}

fn match_entry(value: &Value, path: &str) -> Result<MatchEntry> {
    let obj = object(value, path)?;

    let match_score = match obj.get("match_score") {
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|score| score.is_finite())
            .ok_or_else(|| {
                MatchError::malformed(join(path, "match_score"), "score is not a finite number")
            })?,
        Some(other) => {
            return Err(MatchError::malformed(
                join(path, "match_score"),
                format!("expected a number, found {}", describe(other)),
            ))
        }
        None => return Err(missing(&join(path, "match_score"))),
    };

    let sections_path = join(path, "matched_sections");
    let matched_sections = match obj.get("matched_sections") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, s)| {
                s.as_str().map(str::to_string).ok_or_else(|| {
                    MatchError::malformed(
                        format!("{}[{}]", sections_path, i),
                        format!("expected a string, found {}", describe(s)),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(MatchError::malformed(
                sections_path,
                format!("expected an array, found {}", describe(other)),
            ))
        }
        None => return Err(missing(&sections_path)),
    };

    let category = match obj.get("category") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(MatchError::malformed(
                join(path, "category"),
                format!("expected a string, found {}", describe(other)),
            ))
        }
    };

    Ok(MatchEntry {
        resume_id: string_field(obj, path, "resume_id")?,
        category,
        match_score,
        matched_sections,
        explanation: string_field(obj, path, "explanation")?,
    })
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        MatchError::malformed(path, format!("expected an object, found {}", describe(value)))
    })
}

fn string_field(obj: &Map<String, Value>, path: &str, key: &str) -> Result<String> {
    let field_path = join(path, key);
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(MatchError::malformed(
            field_path,
            format!("expected a string, found {}", describe(other)),
        )),
        None => Err(missing(&field_path)),
    }
}

fn join(path: &str, key: &str) -> String {
    if path == "$" {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn missing(path: &str) -> MatchError {
    MatchError::malformed(path, "field is missing")
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
