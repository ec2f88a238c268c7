//! Transport to the external conjunction-analysis service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::AnalysisError;
use super::wire::ConjunctionRequest;
use crate::config::AnalysisConfig;

/// Something that turns a request into the service's raw response text.
///
/// Implementations report transport and status failures through
/// [`AnalysisError`]; payload interpretation happens in the client.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn submit(&self, request: &ConjunctionRequest) -> Result<String, AnalysisError>;
}

/// JSON-over-HTTP service
pub struct HttpPredictionService {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpPredictionService {
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    /// Use a preconfigured client; the config's timeout is not applied to it
    pub fn with_client(client: Client, config: &AnalysisConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn submit(&self, request: &ConjunctionRequest) -> Result<String, AnalysisError> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Conjunction service returned {}: {}", status, body);
            return Err(AnalysisError::from_status(status.as_u16(), error_message(&body)));
        }

        Ok(response.text().await?)
    }
}

/// Extract `{"error": "..."}` from an error body, falling back to the body itself
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
