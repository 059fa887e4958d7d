//! crates/qa_io/src/client.rs
//!
//! HTTP client for the analysis backend.
//!
//! `POST {API_BASE}/analyze` with `{"url": "<string>"}`. A 2xx JSON body is
//! decoded into an `Analysis`; everything else becomes a `TransportError`
//! whose `Display` is the message shown to the user. No retries.

use std::time::Duration;

use qa_core::SchemaSelect;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;
use crate::loader::{self, Analysis};
use crate::IoError;

#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, reset, ...
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status. `message` is the server `detail` or a synthesized text.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body is not JSON.
    #[error("Invalid response from server: {0}")]
    InvalidBody(String),

    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// User-facing message for a failed response: the body's `detail` string if
/// present, else `Request failed: <status>`.
pub fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed: {status}"))
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    url: &'a str,
}

/// Client for the `/analyze` endpoint.
pub struct AnalyzeClient {
    http: Client,
    endpoint: Url,
    timeout: Option<Duration>,
    schema: SchemaSelect,
}

impl AnalyzeClient {
    pub fn new(config: &ClientConfig) -> Result<Self, IoError> {
        let mut builder = Client::builder();
        if let Some(t) = config.timeout {
            builder = builder.timeout(t);
        }
        let http = builder
            .build()
            .map_err(|e| IoError::Config(format!("http client: {e}")))?;
        Ok(Self {
            http,
            endpoint: config.analyze_endpoint()?,
            timeout: config.timeout,
            schema: config.schema,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit one URL for analysis.
    pub async fn analyze(&self, url: &str) -> Result<Analysis, TransportError> {
        tracing::debug!(target_url = %url, endpoint = %self.endpoint, "POST analyze");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&AnalyzeRequest { url })
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_reqwest(e))?;

        if !status.is_success() {
            let message = error_message(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), %message, "analyze request failed");
            return Err(TransportError::Status { status: status.as_u16(), message });
        }

        let analysis = loader::decode_bytes(&body, self.schema)
            .map_err(|e| TransportError::InvalidBody(e.to_string()))?;

        tracing::debug!(
            schema = %analysis.result.schema(),
            digest = %analysis.digest,
            "analyze request succeeded"
        );
        Ok(analysis)
    }

    fn map_reqwest(&self, e: reqwest::Error) -> TransportError {
        match self.timeout {
            Some(t) if e.is_timeout() => TransportError::Timeout(t),
            _ => TransportError::Network(e.to_string()),
        }
    }
}
