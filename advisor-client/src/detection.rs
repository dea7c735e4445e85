//! Bulk AI-detection client

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use advisor_core::{Error, Result};

/// Minimum non-empty lines before the scoring model gives a stable verdict
const MIN_CONTENT_LINES: usize = 10;

/// Detection API request format
#[derive(Debug, Serialize)]
struct DetectionRequest {
    text: String,
}

/// Per-signal scores backing a detection verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionMetrics {
    pub perplexity: f64,
    pub burstiness: f64,
    pub consistency: f64,
}

/// Outcome of a bulk detection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    pub probability: f64,
    #[serde(default)]
    pub metrics: Option<DetectionMetrics>,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub analysis: String,
}

/// HTTP client for the bulk AI-detection endpoint
pub struct DetectionClient {
    client: Client,
    base_url: String,
}

impl DetectionClient {
    /// Create a new detection client
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .http1_only() // Force HTTP/1.1 to avoid issues with some local servers
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Run bulk detection over `text`.
    ///
    /// The sample is checked against the same rule the service enforces, at
    /// least 10 non-empty lines, so an undersized sample is rejected locally
    /// without a request going out.
    pub async fn detect(&self, text: &str) -> Result<DetectionReport> {
        let line_count = text.lines().filter(|line| !line.trim().is_empty()).count();
        if line_count < MIN_CONTENT_LINES {
            return Err(Error::Validation(format!(
                "detection needs at least {} non-empty lines, got {}",
                MIN_CONTENT_LINES, line_count
            )));
        }

        let request = DetectionRequest {
            text: text.to_string(),
        };

        let url = format!("{}/api/detect/bulk-ai", self.base_url);
        debug!(
            "Sending detection request to {} ({} non-empty lines)",
            url, line_count
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Fault(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Transport(format!("HTTP {}: {}", status, error_text)));
        }

        let report: DetectionReport = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;
        Ok(report)
    }
}
