//! Presentation Layer
//!
//! Transport projection of signed envelopes.

pub mod headers;
