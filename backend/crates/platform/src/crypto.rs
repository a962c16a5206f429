//! Cryptographic Utilities

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// The OS random source could not be read
#[derive(Debug, thiserror::Error)]
#[error("secure random source unavailable: {0}")]
pub struct RandomUnavailable(#[from] rand::Error);

/// Fill `len` bytes from the operating system CSPRNG.
///
/// There is deliberately no infallible variant: callers must not continue
/// with weaker randomness when the OS source fails.
pub fn try_random_bytes(len: usize) -> Result<Vec<u8>, RandomUnavailable> {
    let mut bytes = vec![0u8; len];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Lowercase hex encoding
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// SHA-256 of `data`, hex-encoded (64 lowercase chars)
pub fn sha256_hex(data: &[u8]) -> String {
    to_hex(&sha256(data))
}
