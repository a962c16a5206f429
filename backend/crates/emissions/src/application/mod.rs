//! Application Layer
//!
//! Calculator flows built on the domain services.

pub mod config;
pub mod quick;
pub mod wizard;
