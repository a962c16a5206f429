//! Request Integrity Module
//!
//! Clean Architecture structure:
//! - `domain/` - envelope types, signing services, gateway trait
//! - `application/` - configuration
//! - `infra/` - reqwest-backed edge-function client
//! - `presentation/` - header projection
//!
//! ## Security Model
//! - Every outbound call carries a fresh timestamp and a 16-byte nonce from
//!   the OS CSPRNG
//! - `signature = hex(SHA-256("{timestampMs}.{nonce}.{canonicalPayload}"))`
//! - There is no shared secret. The digest only shows that timestamp, nonce
//!   and payload are mutually consistent; it is not a MAC and does not
//!   identify the sender. Sender identity comes from the bearer key and TLS.
//! - Replay rejection is the receiving service's job
//! - If randomness is unavailable the call is aborted, never sent unsigned

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::EdgeClientConfig;
pub use domain::envelope::{Nonce, Signature, SignedEnvelope};
pub use domain::gateway::{EdgeFunctionGateway, LocalEdgeFunctionGateway};
pub use domain::services::{canonicalize, generate_nonce, sign, sign_with, signing_message};
pub use error::{IntegrityError, IntegrityResult};
pub use infra::edge_client::HttpEdgeFunctionClient;
pub use presentation::headers::{
    NONCE_HEADER, SIGNATURE_HEADER, SignatureHeaders, TIMESTAMP_HEADER, from_header_map,
    to_header_map, to_headers,
};
