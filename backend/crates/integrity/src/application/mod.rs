//! Application Layer

pub mod config;
