//! crates/qa_io/src/hasher.rs
//!
//! SHA-256 digests of raw response bodies. The digest is echoed in the report
//! footer so a rendered page can be matched to the exact payload it came from.
//! Hex is lowercase.

#![forbid(unsafe_code)]

use core::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// `sha256:<64 hex>` for one response body.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResponseDigest(String);

impl ResponseDigest {
    pub fn of(bytes: &[u8]) -> Self {
        ResponseDigest(format!("sha256:{}", sha256_hex(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResponseDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
