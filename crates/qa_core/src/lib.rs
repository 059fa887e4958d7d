//! qa_core: AnalysisResult models, decoding rules, score math and display policies.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! renderer (`qa_io`, `qa_report`, `qa_pipeline`, `qa_cli`).
//!
//! - Two backend contracts as a tagged variant: `AnalysisResult`
//! - Lenient field decoders: absent or mistyped fields never fail a decode
//! - 0–10 score bars and 0–100 Arc Rank text
//! - Verdict tone and LLM-ready policies

#![forbid(unsafe_code)]

pub mod lenient;
pub mod policy;
pub mod schema;
pub mod scores;

pub use policy::{LlmReadyPolicy, Tone, Verdict};
pub use schema::{AnalysisResult, SchemaSelect, SchemaVersion};

pub mod errors {
    use thiserror::Error;

    /// Errors for the few operations in this crate that can fail (token parsing).
    #[derive(Clone, Debug, Eq, PartialEq, Error)]
    pub enum CoreError {
        #[error("unknown schema selector: {0} (expected auto, score-matrix or evaluation)")]
        UnknownSchema(String),

        #[error("unknown llm-ready policy: {0} (expected threshold[:N] or backend-flag)")]
        UnknownPolicy(String),

        #[error("threshold out of range 0..=100: {0}")]
        ThresholdOutOfRange(String),
    }
}

pub use errors::CoreError;
