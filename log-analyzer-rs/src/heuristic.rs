// log-analyzer-rs/src/heuristic.rs
//
// Keyword-counting log analysis
//
// Each non-blank line is checked case-insensitively against three buckets:
// - errors: "error" or "500"
// - timeouts: "timeout" or "timed out"
// - rate limits: "429" or "rate limit"
// A line can land in several buckets.

use async_trait::async_trait;
use shared_types::AnalysisResult;

use crate::error::AnalyzerError;
use crate::LogAnalyzer;

const ERROR_KEYWORDS: &[&str] = &["error", "500"];
const TIMEOUT_KEYWORDS: &[&str] = &["timeout", "timed out"];
const RATE_LIMIT_KEYWORDS: &[&str] = &["429", "rate limit"];

const TIMEOUT_HYPOTHESIS: &str = "Timeout issues may indicate network or performance problems";
const TIMEOUT_ACTION: &str = "Check network connectivity and service response times";
const RATE_LIMIT_HYPOTHESIS: &str = "Rate limiting suggests high traffic or inefficient API usage";
const RATE_LIMIT_ACTION: &str = "Review API usage patterns and implement backoff strategies";
const ERROR_ACTION: &str = "Investigate error root causes";

pub const NORMAL_HYPOTHESIS: &str = "System appears to be operating normally";
pub const NORMAL_ACTION: &str = "Continue monitoring for patterns";

// Confidence is tracked in hundredths so the reported values are exact decimals.
const BASE_CONFIDENCE: u32 = 70;
const VOLUME_BONUS: u32 = 10;
const CLEAN_BONUS: u32 = 10;
const MAX_CONFIDENCE: u32 = 95;
const VOLUME_THRESHOLD: usize = 10;

/// Per-bucket line counts for one log text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogStats {
    /// Non-blank lines
    pub lines: usize,
    pub errors: usize,
    pub timeouts: usize,
    pub rate_limits: usize,
}

impl LogStats {
    pub fn collect(raw_logs: &str) -> Self {
        let mut stats = Self::default();

        for line in raw_logs.lines().filter(|line| !line.trim().is_empty()) {
            let lowered = line.to_lowercase();
            stats.lines += 1;
            if contains_any(&lowered, ERROR_KEYWORDS) {
                stats.errors += 1;
            }
            if contains_any(&lowered, TIMEOUT_KEYWORDS) {
                stats.timeouts += 1;
            }
            if contains_any(&lowered, RATE_LIMIT_KEYWORDS) {
                stats.rate_limits += 1;
            }
        }

        stats
    }

    /// Heuristic confidence for these counts.
    ///
    /// Rate-limit matches do not lower or raise the score; only volume and the
    /// absence of errors and timeouts contribute.
    pub fn confidence(&self) -> f64 {
        let mut hundredths = BASE_CONFIDENCE;
        if self.lines > VOLUME_THRESHOLD {
            hundredths += VOLUME_BONUS;
        }
        if self.errors == 0 && self.timeouts == 0 {
            hundredths += CLEAN_BONUS;
        }
        f64::from(hundredths.min(MAX_CONFIDENCE)) / 100.0
    }

    pub fn summary(&self) -> String {
        format!(
            "Analyzed {} log entries. Found {} errors, {} timeouts, and {} rate limit issues.",
            self.lines, self.errors, self.timeouts, self.rate_limits
        )
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Run the keyword heuristic over raw log text
pub fn summarize(raw_logs: &str) -> AnalysisResult {
    let stats = LogStats::collect(raw_logs);

    let mut hypotheses = Vec::new();
    let mut next_actions = Vec::new();

    if stats.errors > 0 {
        hypotheses.push(format!("{} error(s) detected in logs", stats.errors));
        next_actions.push(ERROR_ACTION.to_string());
    }
    if stats.timeouts > 0 {
        hypotheses.push(TIMEOUT_HYPOTHESIS.to_string());
        next_actions.push(TIMEOUT_ACTION.to_string());
    }
    if stats.rate_limits > 0 {
        hypotheses.push(RATE_LIMIT_HYPOTHESIS.to_string());
        next_actions.push(RATE_LIMIT_ACTION.to_string());
    }

    if hypotheses.is_empty() {
        hypotheses.push(NORMAL_HYPOTHESIS.to_string());
        next_actions.push(NORMAL_ACTION.to_string());
    }

    AnalysisResult {
        summary: stats.summary(),
        hypotheses,
        next_actions,
        confidence: stats.confidence(),
    }
}

/// Deterministic strategy with no external dependencies
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicAnalyzer;

#[async_trait]
impl LogAnalyzer for HeuristicAnalyzer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn analyze(&self, raw_logs: &str) -> Result<AnalysisResult, AnalyzerError> {
        Ok(summarize(raw_logs))
    }
}
