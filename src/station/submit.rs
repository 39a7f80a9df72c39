//! Scan record submission to the collector.

use std::time::Duration;

use serde_json::Value;

use super::record::ScanRecord;

pub const SCAN_PATH: &str = "/scan";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
    #[error("scan request failed: {0}")]
    Request(String),
    #[error("collector rejected scan with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("collector response is not JSON: {0}")]
    Decode(String),
}

/// Sends one scan record and returns the collector's decoded reply.
#[async_trait::async_trait]
pub trait ScanSubmitter: Send + Sync {
    /// Submit a record.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmitError`] if the request fails, the collector answers
    /// with a non-success status, or the reply is not JSON.
    async fn submit(&self, record: &ScanRecord) -> Result<Value, SubmitError>;
}

/// JSON-over-HTTP submitter posting to `<base_url>/scan`.
pub struct HttpSubmitter {
    http: reqwest::Client,
    url: String,
}

impl HttpSubmitter {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, SubmitError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| SubmitError::HttpClientBuild(e.to_string()))?;
        let url = format!("{}{SCAN_PATH}", base_url.trim_end_matches('/'));
        Ok(Self { http, url })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl ScanSubmitter for HttpSubmitter {
    async fn submit(&self, record: &ScanRecord) -> Result<Value, SubmitError> {
        let response = self
            .http
            .post(&self.url)
            .json(record)
            .send()
            .await
            .map_err(|e| SubmitError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SubmitError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(SubmitError::Status { status: status.as_u16(), body: text });
        }

        serde_json::from_str(&text).map_err(|e| SubmitError::Decode(e.to_string()))
    }
}
