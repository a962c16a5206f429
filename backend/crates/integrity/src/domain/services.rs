//! Signing Services

use super::envelope::{NONCE_BYTES, Nonce, Signature, SignedEnvelope};
use crate::error::{IntegrityError, IntegrityResult};
use serde::Serialize;
use serde_json::Value;

/// Fresh nonce from the OS CSPRNG
///
/// Returns `CryptoUnavailable` instead of falling back to a weaker source.
pub fn generate_nonce() -> IntegrityResult<Nonce> {
    let bytes = platform::crypto::try_random_bytes(NONCE_BYTES)?;
    let bytes: [u8; NONCE_BYTES] = bytes.try_into().map_err(|v: Vec<u8>| {
        IntegrityError::CryptoUnavailable(format!("expected {NONCE_BYTES} random bytes, got {}", v.len()))
    })?;
    Ok(Nonce::from_bytes(&bytes))
}

/// Deterministic JSON text for a value
///
/// Object keys are sorted at every depth, arrays keep their order, and no
/// whitespace is emitted. Two structurally equal values always produce the
/// same string regardless of how the maps were built.
pub fn canonicalize(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_scalar(&Value::String(key.clone()), out);
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => write_scalar(scalar, out),
    }
}

fn write_scalar(value: &Value, out: &mut String) {
    // Display on a scalar Value is compact JSON and cannot fail
    out.push_str(&value.to_string());
}

/// Exact bytes that get hashed: `"{timestampMs}.{nonce}.{canonical}"`
pub fn signing_message(timestamp_ms: i64, nonce: &Nonce, canonical: &str) -> String {
    format!("{timestamp_ms}.{nonce}.{canonical}")
}

/// Sign a payload with an explicit timestamp and nonce
///
/// Pure: the same inputs always produce the same envelope.
pub fn sign_with<T: Serialize + ?Sized>(
    payload: &T,
    timestamp_ms: i64,
    nonce: Nonce,
) -> IntegrityResult<SignedEnvelope> {
    let payload = serde_json::to_value(payload)?;
    let canonical = canonicalize(&payload);
    let message = signing_message(timestamp_ms, &nonce, &canonical);
    let signature = Signature::from_digest(&platform::crypto::sha256(message.as_bytes()));

    Ok(SignedEnvelope {
        payload,
        timestamp_ms,
        nonce,
        signature,
    })
}

/// Sign a payload with the current wall-clock time and a fresh nonce
pub fn sign<T: Serialize + ?Sized>(payload: &T) -> IntegrityResult<SignedEnvelope> {
    let nonce = generate_nonce()?;
    let timestamp_ms = chrono::Utc::now().timestamp_millis();
    let envelope = sign_with(payload, timestamp_ms, nonce)?;
    tracing::debug!(
        timestamp_ms = envelope.timestamp_ms,
        nonce = %envelope.nonce,
        "Payload signed"
    );
    Ok(envelope)
}
