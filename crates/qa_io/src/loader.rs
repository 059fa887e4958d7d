//! Loader: response bytes or a saved JSON file → decoded `Analysis`.
//! Field-level problems never fail a load; only non-JSON input does.

#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use qa_core::{AnalysisResult, SchemaSelect};
use serde_json::Value;

use crate::hasher::ResponseDigest;
use crate::IoError;

/// One decoded backend response plus the digest of its raw bytes.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub digest: ResponseDigest,
}

/// Decode raw bytes. `IoError::Json` only when the bytes are not JSON.
pub fn decode_bytes(bytes: &[u8], select: SchemaSelect) -> Result<Analysis, IoError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let result = AnalysisResult::from_value(value, select);
    tracing::debug!(schema = %result.schema(), bytes = bytes.len(), "decoded analysis payload");
    Ok(Analysis { result, digest: ResponseDigest::of(bytes) })
}

/// Read and decode a saved response (e.g. a captured `/analyze` body).
pub fn load_file(path: &Path, select: SchemaSelect) -> Result<Analysis, IoError> {
    let bytes = fs::read(path)
        .map_err(|e| IoError::Path(format!("read {}: {e}", path.display())))?;
    decode_bytes(&bytes, select)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_core::SchemaVersion;
    use std::io::Write;

    #[test]
    fn decodes_partial_payload() {
        let a = decode_bytes(br#"{"faq_block": {"recommended_faqs": []}}"#, SchemaSelect::Auto).unwrap();
        assert_eq!(a.result.schema(), SchemaVersion::ScoreMatrix);
        assert!(a.digest.as_str().starts_with("sha256:"));
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(decode_bytes(b"<html>", SchemaSelect::Auto), Err(IoError::Json(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"llm_view": {{"primary_topic": "x"}}}}"#).unwrap();
        let a = load_file(f.path(), SchemaSelect::Auto).unwrap();
        assert_eq!(a.result.schema(), SchemaVersion::Evaluation);
    }

    #[test]
    fn missing_file_is_path_error() {
        let err = load_file(Path::new("/definitely/not/here.json"), SchemaSelect::Auto).unwrap_err();
        assert!(matches!(err, IoError::Path(_)));
    }
}
