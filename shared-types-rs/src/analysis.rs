// shared-types-rs/src/analysis.rs
// Analysis request and result payloads

use serde::{Deserialize, Serialize};

/// Body of `POST /summarize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub logs: String,
}

impl AnalysisRequest {
    pub fn new(logs: impl Into<String>) -> Self {
        Self { logs: logs.into() }
    }
}

/// Structured summary produced by an analyzer.
///
/// `hypotheses` and `next_actions` are never empty; every strategy emits at
/// least one pair. `confidence` is a self-reported score in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub hypotheses: Vec<String>,
    pub next_actions: Vec<String>,
    pub confidence: f64,
}
