//! Emissions Aggregator
//!
//! Layered structure:
//! - `domain/` - categories, factor tables, value objects and the pure
//!   aggregation services
//! - `application/` - calculator wizard, quick calculators, configuration
//! - `presentation/` - axum router, handlers and DTOs
//!
//! ## Input policy
//! - Quantities come from untrusted form fields. Empty, non-numeric,
//!   negative and non-finite values are coerced to zero, never rejected.
//! - A category or fleet vehicle missing from the injected factor table is a
//!   configuration gap and is always reported as an error.
//! - Computed amounts saturate at `f64::MAX` rather than overflowing to
//!   infinity, so every result serializes as a JSON number.

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

pub use application::config::EmissionsConfig;
pub use application::quick::{QuickCalculators, QuickEstimate};
pub use application::wizard::WizardAnswers;
pub use domain::category::{EmissionCategory, FleetVehicle, Scope};
pub use domain::entities::{
    AggregationResult, DerivedMetrics, EmissionInput, EmissionRecord, MonthlyPoint,
    PeriodComparison, ScopeShares,
};
pub use domain::factors::{EmissionFactor, EmissionFactorTable};
pub use domain::gstin::{Gstin, GstinRejection};
pub use domain::services::{
    TREE_ABSORPTION_KG_PER_YEAR, aggregate, compare_periods, compute_line_emission,
    derive_metrics, derive_metrics_with, monthly_series, summarize_records, to_tonnes,
    tree_equivalent, tree_equivalent_with,
};
pub use domain::value_objects::{Period, Quantity};
pub use error::{EmissionsError, EmissionsResult};
pub use presentation::router::emissions_router;
