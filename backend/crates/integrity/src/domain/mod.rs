//! Domain Layer
//!
//! - Envelope value objects (Nonce, Signature, SignedEnvelope)
//! - Signing services (canonicalization, digest)
//! - Gateway trait for signed outbound calls

pub mod envelope;
pub mod gateway;
pub mod services;
