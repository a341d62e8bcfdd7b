//! Text rendering of analysis results

use std::fmt;

use shared_types::SummarizeResponse;

/// Shown when submit is attempted with blank text
pub const EMPTY_INPUT_MESSAGE: &str = "Please provide some log content";

/// Shown when a failure carries no message of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to summarize logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::High
        } else if confidence >= 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

pub fn confidence_label(confidence: f64) -> &'static str {
    ConfidenceLevel::from_confidence(confidence).as_str()
}

pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

/// Check the text before any request is sent
pub fn validate_input(text: &str) -> Result<&str, &'static str> {
    if text.trim().is_empty() {
        Err(EMPTY_INPUT_MESSAGE)
    } else {
        Ok(text)
    }
}

/// Message shown for a failed submission
pub fn error_message(err: &dyn std::error::Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Result panel for one response
pub struct ResultPanel<'a>(pub &'a SummarizeResponse);

impl fmt::Display for ResultPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.0.result;

        writeln!(f, "Analysis Results")?;
        writeln!(
            f,
            "Confidence: {} ({}%)",
            confidence_label(result.confidence),
            confidence_percent(result.confidence)
        )?;
        writeln!(f)?;
        writeln!(f, "Summary")?;
        writeln!(f, "{}", result.summary)?;
        writeln!(f)?;

        writeln!(f, "Hypotheses")?;
        for (index, hypothesis) in result.hypotheses.iter().enumerate() {
            writeln!(f, "{}. {}", index + 1, hypothesis)?;
        }
        writeln!(f)?;

        writeln!(f, "Next Actions")?;
        for action in &result.next_actions {
            writeln!(f, "[x] {}", action)?;
        }

        if let Some(request_id) = self.0.request_id() {
            writeln!(f)?;
            writeln!(f, "Request ID: {}", request_id)?;
        }

        Ok(())
    }
}

/// Render a response as the result panel text
pub fn render(response: &SummarizeResponse) -> String {
    ResultPanel(response).to_string()
}
