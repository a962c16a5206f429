//! HTTP Handlers

use crate::application::config::EmissionsConfig;
use crate::application::quick::{QuickCalculators, QuickEstimate};
use crate::domain::entities::PeriodComparison;
use crate::domain::grid::{StateGridFactor, all_states, grid_factor_for};
use crate::domain::gstin::Gstin;
use crate::domain::services::{aggregate, compare_periods, monthly_series, summarize_records};
use crate::error::EmissionsError;
use crate::presentation::dto::*;
use axum::Json;
use axum::extract::{Path, State};
use kernel::error::app_error::AppResult;
use std::sync::Arc;

const GRID_FACTOR_UNIT: &str = "kg CO2e/kWh";

/// Shared state for emissions handlers
#[derive(Clone)]
pub struct EmissionsAppState {
    pub config: Arc<EmissionsConfig>,
}

/// POST /api/emissions/aggregate
pub async fn aggregate_inputs(
    State(state): State<EmissionsAppState>,
    Json(req): Json<AggregateRequest>,
) -> AppResult<Json<AggregateResponse>> {
    let result = aggregate(&state.config.factors, &req.inputs)?;
    let metrics = state.config.metrics(&result, req.baseline);

    tracing::info!(
        inputs = req.inputs.len(),
        total_kg = result.total,
        "Emissions aggregated"
    );

    Ok(Json(AggregateResponse { result, metrics }))
}

/// POST /api/emissions/wizard
pub async fn calculate_wizard(
    State(state): State<EmissionsAppState>,
    Json(req): Json<WizardRequest>,
) -> AppResult<Json<WizardResponse>> {
    let result = req.answers.calculate(&state.config.factors)?;
    let metrics = state.config.metrics(&result, req.baseline);

    tracing::info!(total_kg = result.total, "Wizard calculation completed");

    Ok(Json(WizardResponse {
        result_tonnes: result.in_tonnes(),
        shares: result.scope_shares(),
        metrics,
        result,
    }))
}

/// POST /api/emissions/quick/electricity
pub async fn quick_electricity(
    State(state): State<EmissionsAppState>,
    Json(req): Json<QuickElectricityRequest>,
) -> AppResult<Json<QuickEstimate>> {
    let estimate = QuickCalculators::from_config(&state.config).electricity(req.monthly_kwh)?;
    Ok(Json(estimate))
}

/// POST /api/emissions/compare
pub async fn compare(Json(req): Json<CompareRequest>) -> Json<PeriodComparison> {
    Json(compare_periods(&req.previous, &req.current))
}

/// POST /api/emissions/records/summary
pub async fn summarize(Json(req): Json<RecordsSummaryRequest>) -> Json<RecordsSummaryResponse> {
    tracing::debug!(records = req.records.len(), "Summarizing record snapshot");
    Json(RecordsSummaryResponse {
        result: summarize_records(&req.records),
        series: monthly_series(&req.records),
    })
}

/// GET /api/gst/{gstin}
///
/// Always 200: an invalid number is a normal answer, not a request error.
pub async fn validate_gstin(Path(raw): Path<String>) -> AppResult<Json<GstinResponse>> {
    match Gstin::new(&raw) {
        Ok(gstin) => Ok(Json(GstinResponse {
            valid: true,
            state: grid_factor_for(gstin.state_code()).ok().map(|g| g.state),
            state_code: Some(gstin.state_code().to_string()),
            gstin: Some(gstin.into()),
            reason: None,
        })),
        Err(EmissionsError::InvalidGstin(rejection)) => Ok(Json(GstinResponse {
            valid: false,
            gstin: None,
            state_code: None,
            state: None,
            reason: Some(rejection.to_string()),
        })),
        Err(other) => Err(other.into()),
    }
}

fn grid_response(grid: &StateGridFactor) -> GridFactorResponse {
    GridFactorResponse {
        state: grid.state,
        gst_state_code: grid.gst_state_code,
        factor: grid.factor,
        unit: GRID_FACTOR_UNIT,
    }
}

/// GET /api/grid-factors/{state}
pub async fn grid_factor(Path(state): Path<String>) -> AppResult<Json<GridFactorResponse>> {
    let grid = grid_factor_for(&state)?;
    Ok(Json(grid_response(&grid)))
}

/// GET /api/grid-factors
pub async fn list_grid_factors() -> Json<Vec<GridFactorResponse>> {
    Json(all_states().iter().map(grid_response).collect())
}
