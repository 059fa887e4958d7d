//! qa_pipeline: the result renderer (submit → loading → rendered | errored).
//!
//! The renderer owns its collaborators explicitly: a backend behind the
//! `AnalyzeBackend` seam and a `Surface` holding the page containers. No
//! ambient lookups, one request in flight at a time, no retries.

#![forbid(unsafe_code)]

use thiserror::Error;

use qa_io::TransportError;

pub mod backend;
pub mod renderer;
pub mod surface;

pub use backend::{AnalyzeBackend, ReplayBackend};
pub use renderer::{RendererState, ResultRenderer};
pub use surface::{HtmlSurface, Surface};

/// Inline text for an empty submission.
pub const VALIDATION_MESSAGE: &str = "Please enter a URL.";
pub const STATUS_COMPLETE: &str = "Analysis complete.";
pub const STATUS_FAILED: &str = "Analysis failed.";
/// Shown when an in-flight submission is abandoned by its caller.
pub const STATUS_CANCELLED: &str = "Analysis cancelled.";

pub fn status_analyzing(url: &str) -> String {
    format!("Analyzing {url}…")
}

/// Why a submission did not render a result.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Empty or whitespace-only URL; no request was made.
    #[error("Please enter a URL.")]
    Validation,

    /// A request is already in flight; nothing was touched.
    #[error("an analysis is already in progress")]
    Busy,

    #[error(transparent)]
    Transport(#[from] TransportError),
}
