//! crates/qa_io/src/lib.rs
//! The only wire contract this layer owns: `POST {API_BASE}/analyze`.
//!
//! - `client`: reqwest-based `AnalyzeClient` and the `TransportError` taxonomy
//! - `config`: API base resolution (flag → env → default), timeout, schema pin
//! - `loader`: bytes/file → `Analysis` (decoded result + digest)
//! - `hasher`: SHA-256 digest of the raw response body
//! - `output`: atomic report file writes

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod client;
pub mod config;
pub mod hasher;
pub mod loader;
pub mod output;

pub use client::{AnalyzeClient, TransportError};
pub use config::ClientConfig;
pub use hasher::ResponseDigest;
pub use loader::Analysis;

/// Local (non-transport) failures: files, JSON documents, configuration.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors.
    #[error("io/path error: {0}")]
    Path(String),

    /// A document that is not JSON at all.
    #[error("json error: {0}")]
    Json(String),

    /// Bad configuration value (API base, timeout).
    #[error("config error: {0}")]
    Config(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json(e.to_string())
    }
}

pub mod prelude {
    pub use crate::{
        Analysis, AnalyzeClient, ClientConfig, IoError, IoResult, ResponseDigest, TransportError,
    };
}
