//! crates/qa_io/src/config.rs
//! Client configuration: API base, optional timeout, schema pin.

use std::time::Duration;

use qa_core::SchemaSelect;
use url::Url;

use crate::IoError;

pub const API_BASE_ENV: &str = "QUERYARC_API_BASE";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const ANALYZE_PATH: &str = "analyze";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base: Url,
    /// No timeout unless set.
    pub timeout: Option<Duration>,
    pub schema: SchemaSelect,
}

impl ClientConfig {
    /// Parse an API base. Only `http`/`https` bases are accepted.
    pub fn new(api_base: &str) -> Result<Self, IoError> {
        let trimmed = api_base.trim();
        let api_base = Url::parse(trimmed)
            .map_err(|e| IoError::Config(format!("invalid API base {trimmed:?}: {e}")))?;
        match api_base.scheme() {
            "http" | "https" => {}
            other => {
                return Err(IoError::Config(format!(
                    "API base must be http or https, got {other}://"
                )))
            }
        }
        Ok(Self { api_base, timeout: None, schema: SchemaSelect::Auto })
    }

    /// Resolve in order: explicit value → `QUERYARC_API_BASE` → default.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, IoError> {
        let from_env = std::env::var(API_BASE_ENV).ok().filter(|s| !s.trim().is_empty());
        let base = explicit
            .map(str::to_string)
            .or(from_env)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self::new(&base)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_schema(mut self, schema: SchemaSelect) -> Self {
        self.schema = schema;
        self
    }

    /// `{API_BASE}/analyze`; a trailing slash on the base is tolerated and a
    /// path prefix on the base is kept.
    pub fn analyze_endpoint(&self) -> Result<Url, IoError> {
        let base = self.api_base.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{ANALYZE_PATH}"))
            .map_err(|e| IoError::Config(format!("cannot build analyze endpoint: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let a = ClientConfig::new("http://localhost:8000").unwrap();
        let b = ClientConfig::new("http://localhost:8000/").unwrap();
        assert_eq!(a.analyze_endpoint().unwrap().as_str(), "http://localhost:8000/analyze");
        assert_eq!(b.analyze_endpoint().unwrap().as_str(), "http://localhost:8000/analyze");
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let c = ClientConfig::new("https://api.example.com/api/tools/arc-rank-checker/").unwrap();
        assert_eq!(
            c.analyze_endpoint().unwrap().as_str(),
            "https://api.example.com/api/tools/arc-rank-checker/analyze"
        );
    }

    #[test]
    fn rejects_non_http_bases() {
        assert!(matches!(ClientConfig::new("file:///tmp/x"), Err(IoError::Config(_))));
        assert!(matches!(ClientConfig::new("not a url"), Err(IoError::Config(_))));
    }

    #[test]
    fn explicit_value_wins() {
        let c = ClientConfig::resolve(Some("https://explicit.example")).unwrap();
        assert_eq!(c.api_base.host_str(), Some("explicit.example"));
        assert!(c.timeout.is_none());
    }
}
