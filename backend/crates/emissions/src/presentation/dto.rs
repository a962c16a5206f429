//! API DTOs (Data Transfer Objects)

use crate::application::wizard::WizardAnswers;
use crate::domain::entities::{
    AggregationResult, DerivedMetrics, EmissionInput, EmissionRecord, MonthlyPoint, ScopeShares,
};
use crate::domain::value_objects::Quantity;
use serde::{Deserialize, Serialize};

/// Request for POST /api/emissions/aggregate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRequest {
    pub inputs: Vec<EmissionInput>,
    /// Baseline total in kg CO2e for the reduction metric
    #[serde(default)]
    pub baseline: Option<f64>,
}

/// Response for POST /api/emissions/aggregate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    pub result: AggregationResult,
    pub metrics: DerivedMetrics,
}

/// Request for POST /api/emissions/wizard
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardRequest {
    #[serde(flatten)]
    pub answers: WizardAnswers,
    #[serde(default)]
    pub baseline: Option<f64>,
}

/// Response for POST /api/emissions/wizard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardResponse {
    pub result: AggregationResult,
    pub result_tonnes: AggregationResult,
    pub metrics: DerivedMetrics,
    pub shares: ScopeShares,
}

/// Request for POST /api/emissions/quick/electricity
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickElectricityRequest {
    #[serde(default)]
    pub monthly_kwh: Quantity,
}

/// Request for POST /api/emissions/compare
#[derive(Debug, Clone, Deserialize)]
pub struct CompareRequest {
    pub previous: AggregationResult,
    pub current: AggregationResult,
}

/// Request for POST /api/emissions/records/summary
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsSummaryRequest {
    pub records: Vec<EmissionRecord>,
}

/// Response for POST /api/emissions/records/summary
#[derive(Debug, Clone, Serialize)]
pub struct RecordsSummaryResponse {
    pub result: AggregationResult,
    pub series: Vec<MonthlyPoint>,
}

/// Response for GET /api/gst/{gstin}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GstinResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Response for GET /api/grid-factors/{state}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridFactorResponse {
    pub state: &'static str,
    pub gst_state_code: &'static str,
    pub factor: f64,
    pub unit: &'static str,
}
