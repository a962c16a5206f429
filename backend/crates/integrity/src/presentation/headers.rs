//! Signature Headers
//!
//! Header names are part of the wire contract with the edge functions and
//! must not change.

use crate::domain::envelope::{Nonce, Signature, SignedEnvelope};
use crate::error::{IntegrityError, IntegrityResult};
use http::{HeaderMap, HeaderName, HeaderValue};

pub const TIMESTAMP_HEADER: &str = "x-request-timestamp";
pub const NONCE_HEADER: &str = "x-request-nonce";
pub const SIGNATURE_HEADER: &str = "x-request-signature";

fn header_value(value: &str) -> IntegrityResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| IntegrityError::InvalidHeader(e.to_string()))
}

/// The three signature headers in fixed order: timestamp, nonce, signature
pub fn to_headers(envelope: &SignedEnvelope) -> IntegrityResult<[(HeaderName, HeaderValue); 3]> {
    Ok([
        (
            HeaderName::from_static(TIMESTAMP_HEADER),
            header_value(&envelope.timestamp_ms.to_string())?,
        ),
        (
            HeaderName::from_static(NONCE_HEADER),
            header_value(envelope.nonce.as_str())?,
        ),
        (
            HeaderName::from_static(SIGNATURE_HEADER),
            header_value(envelope.signature.as_str())?,
        ),
    ])
}

pub fn to_header_map(envelope: &SignedEnvelope) -> IntegrityResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(3);
    for (name, value) in to_headers(envelope)? {
        map.insert(name, value);
    }
    Ok(map)
}

/// Signature fields as read back from request headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeaders {
    pub timestamp_ms: i64,
    pub nonce: Nonce,
    pub signature: Signature,
}

/// Parse the three signature headers. Only checks format, not the digest.
pub fn from_header_map(headers: &HeaderMap) -> IntegrityResult<SignatureHeaders> {
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| IntegrityError::InvalidHeader(format!("missing {name}")))
    };

    let timestamp_ms = get(TIMESTAMP_HEADER)?
        .parse::<i64>()
        .map_err(|e| IntegrityError::InvalidHeader(format!("{TIMESTAMP_HEADER}: {e}")))?;
    let nonce = Nonce::parse(get(NONCE_HEADER)?)
        .ok_or_else(|| IntegrityError::InvalidHeader(format!("malformed {NONCE_HEADER}")))?;
    let signature = Signature::parse(get(SIGNATURE_HEADER)?)
        .ok_or_else(|| IntegrityError::InvalidHeader(format!("malformed {SIGNATURE_HEADER}")))?;

    Ok(SignatureHeaders {
        timestamp_ms,
        nonce,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_header() {
        let err = from_header_map(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, IntegrityError::InvalidHeader(_)));
    }

    #[test]
    fn test_malformed_timestamp() {
        let mut map = HeaderMap::new();
        map.insert(TIMESTAMP_HEADER, HeaderValue::from_static("soon"));
        map.insert(NONCE_HEADER, HeaderValue::from_static("00000000000000000000000000000000"));
        map.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_static("0000000000000000000000000000000000000000000000000000000000000000"),
        );
        assert!(from_header_map(&map).is_err());
    }
}
