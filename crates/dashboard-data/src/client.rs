//! HTTP client for the remote summary endpoint.

use std::time::Duration;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::ChartBundle;
use reqwest::Client;
use serde_json::Value;

use crate::normalizer::normalize;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Single-endpoint summary client.
///
/// Issues one GET per call with no retries; the caller decides what to show
/// when a fetch fails.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: Client,
    url: String,
}

impl SummaryClient {
    /// Build a client for `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The configured endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the endpoint and parse the body as JSON.
    ///
    /// Non-2xx responses are errors even when they carry a JSON body.
    pub async fn fetch_payload(&self) -> Result<Value> {
        tracing::debug!(url = %self.url, "fetching summary");

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        let payload: Value =
            serde_json::from_slice(&body).map_err(|e| DashboardError::Decode(e.to_string()))?;

        tracing::debug!(bytes = body.len(), "summary payload received");
        Ok(payload)
    }

    /// Fetch and normalize in one step.
    pub async fn fetch_bundle(&self) -> Result<ChartBundle> {
        let payload = self.fetch_payload().await?;
        Ok(normalize(&payload))
    }
}

/// Map a transport error onto the dashboard error variants.
fn classify(e: reqwest::Error) -> DashboardError {
    if e.is_timeout() {
        DashboardError::Timeout
    } else if e.is_connect() {
        DashboardError::Unavailable(e.to_string())
    } else if e.is_decode() {
        DashboardError::Decode(e.to_string())
    } else {
        DashboardError::Request(e.to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
