//! Backend seam. The live implementation is `qa_io::AnalyzeClient`;
//! `ReplayBackend` serves a previously captured response (offline renders).

use async_trait::async_trait;

use qa_io::{Analysis, AnalyzeClient, TransportError};

#[async_trait]
pub trait AnalyzeBackend: Send + Sync {
    async fn analyze(&self, url: &str) -> Result<Analysis, TransportError>;
}

#[async_trait]
impl AnalyzeBackend for AnalyzeClient {
    async fn analyze(&self, url: &str) -> Result<Analysis, TransportError> {
        AnalyzeClient::analyze(self, url).await
    }
}

/// Answers every request with the same decoded response.
#[derive(Clone, Debug)]
pub struct ReplayBackend {
    analysis: Analysis,
}

impl ReplayBackend {
    pub fn new(analysis: Analysis) -> Self {
        Self { analysis }
    }
}

#[async_trait]
impl AnalyzeBackend for ReplayBackend {
    async fn analyze(&self, url: &str) -> Result<Analysis, TransportError> {
        tracing::debug!(target_url = %url, digest = %self.analysis.digest, "replaying saved response");
        Ok(self.analysis.clone())
    }
}
