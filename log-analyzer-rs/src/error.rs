// log-analyzer-rs/src/error.rs
// Analyzer failure taxonomy

/// Errors an analysis strategy can report
///
/// None of these reach HTTP callers: `FallbackAnalyzer` recovers from all of
/// them by running the heuristic strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzerError {
    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),
}
