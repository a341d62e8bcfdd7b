// triage-client-rs/src/api.rs
//
// HTTP client for the triage API
//
// One JSON POST per submission, no retry. Non-2xx responses fail with the
// status code and reason phrase; the error body is not inspected.

use std::time::Duration;

use config_rs::ClientConfig;
use reqwest::Client;
use shared_types::{AnalysisRequest, SummarizeResponse};

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("API Error: {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Invalid response from API: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    api_base: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_base_url(&config.api_base)
    }

    pub fn with_base_url(api_base: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn summarize_url(&self) -> String {
        format!("{}/summarize", self.api_base)
    }

    /// Submit raw log text for analysis
    pub async fn submit(&self, logs: &str) -> Result<SummarizeResponse, ApiClientError> {
        let url = self.summarize_url();
        tracing::debug!("POST {} ({} characters)", url, logs.chars().count());

        let response = self
            .client
            .post(&url)
            .json(&AnalysisRequest::new(logs))
            .send()
            .await
            .map_err(ApiClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiClientError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response
            .json::<SummarizeResponse>()
            .await
            .map_err(ApiClientError::Decode)
    }
}
