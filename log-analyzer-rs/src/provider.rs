// log-analyzer-rs/src/provider.rs
//
// Provider selection and fallback
//
// The external provider is a placeholder: once a credential is configured it
// logs a warning and delegates to the heuristic strategy. Without a credential
// it fails with a configuration error, which `FallbackAnalyzer` turns into a
// heuristic result so callers always get an analysis.

use std::sync::Arc;

use async_trait::async_trait;
use config_rs::{ProviderConfig, ProviderKind};
use shared_types::AnalysisResult;

use crate::error::AnalyzerError;
use crate::heuristic::{self, HeuristicAnalyzer};
use crate::LogAnalyzer;

/// Third-party analysis provider (stub)
#[derive(Clone)]
pub struct ExternalAnalyzer {
    api_key: Option<String>,
    delegate: HeuristicAnalyzer,
}

impl ExternalAnalyzer {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            delegate: HeuristicAnalyzer,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for ExternalAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalAnalyzer")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[async_trait]
impl LogAnalyzer for ExternalAnalyzer {
    fn name(&self) -> &'static str {
        "external"
    }

    async fn analyze(&self, raw_logs: &str) -> Result<AnalysisResult, AnalyzerError> {
        if !self.is_configured() {
            return Err(AnalyzerError::ProviderConfiguration(
                "external provider API key not configured".to_string(),
            ));
        }

        // No provider integration exists yet; the heuristic answers on its behalf.
        tracing::warn!("External provider not yet implemented, falling back to heuristic analysis");
        self.delegate.analyze(raw_logs).await
    }
}

/// Runs a primary strategy and falls back to the heuristic when it fails
#[derive(Clone)]
pub struct FallbackAnalyzer {
    primary: Arc<dyn LogAnalyzer>,
}

impl FallbackAnalyzer {
    pub fn new(primary: Arc<dyn LogAnalyzer>) -> Self {
        Self { primary }
    }

    pub fn heuristic() -> Self {
        Self::new(Arc::new(HeuristicAnalyzer))
    }

    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    /// Analyze raw log text. Never fails.
    pub async fn analyze(&self, raw_logs: &str) -> AnalysisResult {
        match self.primary.analyze(raw_logs).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(
                    provider = self.primary.name(),
                    error = %err,
                    "Analysis provider failed, falling back to heuristic analysis"
                );
                heuristic::summarize(raw_logs)
            }
        }
    }
}

impl std::fmt::Debug for FallbackAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackAnalyzer")
            .field("primary", &self.primary.name())
            .finish()
    }
}

/// Build the analyzer selected by configuration
pub fn build_analyzer(config: &ProviderConfig) -> FallbackAnalyzer {
    let primary: Arc<dyn LogAnalyzer> = match config.kind {
        ProviderKind::Heuristic => Arc::new(HeuristicAnalyzer),
        ProviderKind::External => {
            if config.api_key.is_none() {
                tracing::warn!("External provider selected without AI_API_KEY; requests will use heuristic analysis");
            }
            Arc::new(ExternalAnalyzer::new(config.api_key.clone()))
        }
    };

    tracing::info!(provider = primary.name(), "Analyzer initialized");
    FallbackAnalyzer::new(primary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        (buffer, tracing::subscriber::set_default(subscriber))
    }

    struct BrokenProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LogAnalyzer for BrokenProvider {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn analyze(&self, _raw_logs: &str) -> Result<AnalysisResult, AnalyzerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AnalyzerError::ProviderConfiguration("credential rejected".to_string()))
        }
    }

    #[tokio::test]
    async fn test_external_without_key_fails_with_configuration_error() {
        let analyzer = ExternalAnalyzer::new(None);
        let err = analyzer.analyze("ERROR foo").await.unwrap_err();
        assert!(matches!(err, AnalyzerError::ProviderConfiguration(_)));
    }

    #[tokio::test]
    async fn test_external_with_key_delegates_to_heuristic() {
        let analyzer = ExternalAnalyzer::new(Some("sk-test".to_string()));
        let result = analyzer.analyze("ERROR foo\nbar").await.unwrap();
        assert_eq!(result, heuristic::summarize("ERROR foo\nbar"));
    }

    #[tokio::test]
    async fn test_fallback_recovers_from_misconfigured_external() {
        let analyzer = build_analyzer(&ProviderConfig {
            kind: ProviderKind::External,
            api_key: None,
        });
        assert_eq!(analyzer.primary_name(), "external");

        let result = analyzer.analyze("timeout talking to db").await;
        assert_eq!(result, heuristic::summarize("timeout talking to db"));
    }

    #[tokio::test]
    async fn test_fallback_logs_configuration_error_at_warn() {
        let (logs, _guard) = capture_logs();
        let analyzer = FallbackAnalyzer::new(Arc::new(ExternalAnalyzer::new(None)));

        analyzer.analyze("ERROR foo").await;

        let output = logs.contents();
        let line = output
            .lines()
            .find(|line| line.contains("falling back to heuristic analysis"))
            .expect("fallback warning logged");
        assert!(line.contains("WARN"));
        assert!(line.contains("provider=\"external\""));
        assert!(line.contains("Provider configuration error"));
        assert!(!output.contains("ERROR foo"));
    }

    #[tokio::test]
    async fn test_fallback_recovers_from_any_provider_error() {
        let provider = Arc::new(BrokenProvider {
            calls: AtomicUsize::new(0),
        });
        let analyzer = FallbackAnalyzer::new(provider.clone());

        let result = analyzer.analyze("429 Too Many Requests").await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.confidence, 0.80);
        assert_eq!(result.hypotheses.len(), 1);
    }

    #[tokio::test]
    async fn test_default_configuration_is_heuristic() {
        let analyzer = build_analyzer(&ProviderConfig::default());
        assert_eq!(analyzer.primary_name(), "heuristic");
    }
}
