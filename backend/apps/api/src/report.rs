//! Signed Emissions Reports
//!
//! Aggregates a submission and forwards the result to the reporting edge
//! function. The outbound call is signed by the gateway; if signing fails
//! nothing is sent.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use emissions::{AggregationResult, DerivedMetrics, EmissionInput, EmissionsConfig};
use integrity::{EdgeFunctionGateway, IntegrityError};
use kernel::error::app_error::AppResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const REPORT_FUNCTION: &str = "emissions-report";

#[derive(Clone)]
pub struct ReportState<G>
where
    G: EdgeFunctionGateway + Clone + Send + Sync + 'static,
{
    pub gateway: Arc<G>,
    pub config: Arc<EmissionsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub inputs: Vec<EmissionInput>,
    #[serde(default)]
    pub baseline: Option<f64>,
}

/// Body sent to the edge function
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub result: AggregationResult,
    pub metrics: DerivedMetrics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    #[serde(flatten)]
    pub report: ReportPayload,
    /// Edge function response, passed through
    pub receipt: serde_json::Value,
}

/// POST /api/emissions/report
pub async fn submit_report<G>(
    State(state): State<ReportState<G>>,
    Json(req): Json<ReportRequest>,
) -> AppResult<Json<ReportResponse>>
where
    G: EdgeFunctionGateway + Clone + Send + Sync + 'static,
{
    let result = emissions::aggregate(&state.config.factors, &req.inputs)?;
    let metrics = state.config.metrics(&result, req.baseline);
    let report = ReportPayload { result, metrics };

    let payload = serde_json::to_value(&report).map_err(IntegrityError::from)?;
    let receipt = state.gateway.invoke(REPORT_FUNCTION, &payload).await?;

    tracing::info!(
        total_kg = report.result.total,
        function = REPORT_FUNCTION,
        "Emissions report forwarded"
    );

    Ok(Json(ReportResponse { report, receipt }))
}

/// Report router for any gateway implementation. Mount under `/api`.
pub fn report_router<G>(gateway: G, config: EmissionsConfig) -> Router
where
    G: EdgeFunctionGateway + Clone + Send + Sync + 'static,
{
    let state = ReportState {
        gateway: Arc::new(gateway),
        config: Arc::new(config),
    };

    Router::new()
        .route("/emissions/report", post(submit_report::<G>))
        .with_state(state)
}
