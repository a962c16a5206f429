//! Emissions Router

use crate::application::config::EmissionsConfig;
use crate::presentation::handlers::{self, EmissionsAppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Create the emissions router. Mount under `/api`.
pub fn emissions_router(config: EmissionsConfig) -> Router {
    let state = EmissionsAppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/emissions/aggregate", post(handlers::aggregate_inputs))
        .route("/emissions/wizard", post(handlers::calculate_wizard))
        .route("/emissions/quick/electricity", post(handlers::quick_electricity))
        .route("/emissions/compare", post(handlers::compare))
        .route("/emissions/records/summary", post(handlers::summarize))
        .route("/gst/{gstin}", get(handlers::validate_gstin))
        .route("/grid-factors", get(handlers::list_grid_factors))
        .route("/grid-factors/{state}", get(handlers::grid_factor))
        .with_state(state)
}
