//! Summarize request validation
//!
//! Request bodies are checked against a compiled JSON Schema. Every schema
//! violation becomes one [`ValidationIssue`] so clients get field-level details
//! in the 400 response.

use axum::http::{header::CONTENT_LENGTH, HeaderMap};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, JSONSchema};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use shared_types::{AnalysisRequest, ValidationIssue};

/// Maximum accepted request body size (2MB)
pub const MAX_PAYLOAD_SIZE: usize = 2 * 1024 * 1024;

pub const EMPTY_LOGS_MESSAGE: &str = "Logs cannot be empty";

/// Schema for summarize request: `logs` must be a string with at least one non-whitespace character
pub static SUMMARIZE_REQUEST_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema = json!({
        "type": "object",
        "required": ["logs"],
        "properties": {
            "logs": {
                "type": "string",
                "pattern": "\\S"
            }
        }
    });

    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("Invalid schema")
});

/// Parse and validate a raw summarize body
///
/// An empty body is treated as `{}` so it reports the missing `logs` field.
pub fn parse_summarize_request(body: &[u8]) -> Result<AnalysisRequest, Vec<ValidationIssue>> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice::<Value>(body)
            .map_err(|e| vec![ValidationIssue::new("", format!("Malformed JSON: {}", e))])?
    };

    validate_summarize_value(&value)?;

    match value.get("logs").and_then(Value::as_str) {
        Some(logs) => Ok(AnalysisRequest::new(logs)),
        None => Err(vec![ValidationIssue::new("/logs", "Required")]),
    }
}

/// Validate a parsed JSON body against the summarize schema
pub fn validate_summarize_value(value: &Value) -> Result<(), Vec<ValidationIssue>> {
    if let Err(errors) = SUMMARIZE_REQUEST_SCHEMA.validate(value) {
        let issues: Vec<ValidationIssue> = errors
            .map(|err| {
                let path = err.instance_path.to_string();
                match &err.kind {
                    ValidationErrorKind::Required { property } => {
                        let field = property.as_str().unwrap_or_default();
                        ValidationIssue::new(format!("{}/{}", path, field), "Required")
                    }
                    ValidationErrorKind::Pattern { .. } => {
                        ValidationIssue::new(path, EMPTY_LOGS_MESSAGE)
                    }
                    _ => ValidationIssue::new(path, err.to_string()),
                }
            })
            .collect();

        return Err(issues);
    }

    Ok(())
}

/// Whether the request declares a `Content-Length` above [`MAX_PAYLOAD_SIZE`]
pub fn exceeds_payload_limit(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .is_some_and(|length| length > MAX_PAYLOAD_SIZE as u64)
}
