// shared-types-rs/src/envelope.rs
// Response and error envelopes returned by the triage API

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;

/// Correlation metadata attached to every summarize response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
}

impl ResponseMeta {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

/// Successful `POST /summarize` body: the analysis plus optional metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl SummarizeResponse {
    pub fn new(result: AnalysisResult, request_id: impl Into<String>) -> Self {
        Self {
            result,
            meta: Some(ResponseMeta::new(request_id)),
        }
    }

    pub fn request_id(&self) -> Option<&str> {
        self.meta.as_ref().map(|meta| meta.request_id.as_str())
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// JSON pointer into the request body, empty for the document root
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Uniform error body for 4xx/5xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ValidationIssue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
            meta: None,
        }
    }

    pub fn with_details(mut self, details: Vec<ValidationIssue>) -> Self {
        self.details = details;
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.meta = Some(ResponseMeta::new(request_id));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summarize_response_flattens_result() {
        let response = SummarizeResponse::new(
            AnalysisResult {
                summary: "s".to_string(),
                hypotheses: vec!["h".to_string()],
                next_actions: vec!["a".to_string()],
                confidence: 0.7,
            },
            "abc123",
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["summary"], "s");
        assert_eq!(value["nextActions"], json!(["a"]));
        assert_eq!(value["meta"]["requestId"], "abc123");
    }

    #[test]
    fn test_summarize_response_without_meta() {
        let parsed: SummarizeResponse = serde_json::from_value(json!({
            "summary": "s",
            "hypotheses": ["h"],
            "nextActions": ["a"],
            "confidence": 0.9
        }))
        .unwrap();

        assert!(parsed.meta.is_none());
        assert_eq!(parsed.request_id(), None);
    }

    #[test]
    fn test_error_envelope_omits_empty_fields() {
        let value = serde_json::to_value(ErrorEnvelope::new("Route not found")).unwrap();
        assert_eq!(value, json!({ "error": "Route not found" }));

        let value = serde_json::to_value(
            ErrorEnvelope::new("Invalid request data")
                .with_details(vec![ValidationIssue::new("/logs", "Logs cannot be empty")])
                .with_request_id("r1"),
        )
        .unwrap();
        assert_eq!(value["details"][0]["path"], "/logs");
        assert_eq!(value["meta"]["requestId"], "r1");
    }
}
