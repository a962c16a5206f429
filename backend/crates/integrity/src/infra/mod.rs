//! Infrastructure Layer

pub mod edge_client;
