//! Log analysis strategies for the triage service.
//!
//! [`HeuristicAnalyzer`] counts error, timeout and rate-limit lines and turns
//! the counts into hypotheses, actions and a confidence score.
//! [`ExternalAnalyzer`] stands in for a third-party provider. Callers go
//! through [`FallbackAnalyzer`], which always yields a result.

use async_trait::async_trait;
use shared_types::AnalysisResult;

pub mod error;
pub mod heuristic;
pub mod provider;

pub use error::AnalyzerError;
pub use heuristic::{summarize, HeuristicAnalyzer, LogStats};
pub use provider::{build_analyzer, ExternalAnalyzer, FallbackAnalyzer};

/// A log analysis strategy
#[async_trait]
pub trait LogAnalyzer: Send + Sync {
    /// Short provider name used in logs and the health endpoint
    fn name(&self) -> &'static str;

    async fn analyze(&self, raw_logs: &str) -> Result<AnalysisResult, AnalyzerError>;
}
