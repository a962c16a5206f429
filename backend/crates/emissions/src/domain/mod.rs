//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Categories, scopes and factor tables
//! - Value objects (Quantity, Period, Gstin)
//! - Entities (inputs, results, record snapshots)
//! - Domain services (aggregation and derived metrics)
//! - Static state grid factors

pub mod category;
pub mod entities;
pub mod factors;
pub mod grid;
pub mod gstin;
pub mod services;
pub mod value_objects;
