//! HTTP client for the Roomcraft API.

use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use roomcraft_core::JobStatus;

use crate::error::ClientError;
use crate::stream::EventStream;

/// Snapshot of a render job as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSnapshot {
    pub job_id: String,
    pub design_id: String,
    pub status: JobStatus,
    pub image_url: Option<String>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// HTTP client for the Roomcraft API.
pub struct RoomcraftClient {
    inner: reqwest::Client,
    base_url: String,
}

impl RoomcraftClient {
    /// Create a new client.
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = format!("{}/health", self.base_url);
        debug!(url = %url, "Checking health");

        let response = self.inner.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    /// Submit a render job for a design. Returns the pending snapshot.
    pub async fn submit_job(&self, design_id: &str) -> Result<JobSnapshot, ClientError> {
        self.post_json("/jobs", &json!({ "design_id": design_id }))
            .await
    }

    /// Poll the current snapshot of a render job.
    pub async fn job_status(&self, job_id: &str) -> Result<JobSnapshot, ClientError> {
        self.get_json(&format!("/jobs/{job_id}")).await
    }

    /// Open a procurement event stream for a design.
    ///
    /// Any non-2xx initial response is a hard failure before frames are read.
    pub async fn procure(
        &self,
        design_id: &str,
        budget_usd: Option<f64>,
        preferred_vendors: &[String],
    ) -> Result<EventStream, ClientError> {
        let url = format!("{}/agent/stream", self.base_url);
        debug!(url = %url, design_id = %design_id, "Opening procurement stream");

        let response = self
            .inner
            .post(&url)
            .json(&json!({
                "design_id": design_id,
                "budget_usd": budget_usd,
                "preferred_vendors": preferred_vendors,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chunks = response
            .bytes_stream()
            .map_ok(|bytes| bytes.to_vec())
            .map_err(ClientError::from);
        Ok(EventStream::new(chunks))
    }

    /// Get JSON from an endpoint.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET request");

        let response = self.inner.get(&url).send().await?;
        Self::decode(response, path).await
    }

    /// Post JSON to an endpoint and decode the JSON reply.
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST request");

        let response = self.inner.post(&url).json(body).send().await?;
        Self::decode(response, path).await
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }
}
