//! Envelope Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

pub const NONCE_BYTES: usize = 16;
pub const NONCE_HEX_LEN: usize = NONCE_BYTES * 2;
pub const SIGNATURE_HEX_LEN: usize = 64;

fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Single-use request nonce: 16 random bytes as 32 lowercase hex chars
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nonce(String);

impl Nonce {
    pub fn from_bytes(bytes: &[u8; NONCE_BYTES]) -> Self {
        Self(platform::crypto::to_hex(bytes))
    }

    /// Accept an existing hex nonce, e.g. one echoed back by a test server
    pub fn parse(s: &str) -> Option<Self> {
        is_lower_hex(s, NONCE_HEX_LEN).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Nonce {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Nonce::parse(&s).ok_or_else(|| format!("nonce must be {NONCE_HEX_LEN} lowercase hex chars"))
    }
}

impl From<Nonce> for String {
    fn from(nonce: Nonce) -> Self {
        nonce.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// SHA-256 digest as 64 lowercase hex chars
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signature(String);

impl Signature {
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        Self(platform::crypto::to_hex(digest))
    }

    pub fn parse(s: &str) -> Option<Self> {
        is_lower_hex(s, SIGNATURE_HEX_LEN).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Signature {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Signature::parse(&s)
            .ok_or_else(|| format!("signature must be {SIGNATURE_HEX_LEN} lowercase hex chars"))
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signed outbound request. Built fresh per call, never stored or reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedEnvelope {
    pub payload: serde_json::Value,
    pub timestamp_ms: i64,
    pub nonce: Nonce,
    pub signature: Signature,
}
