//! Domain Entities
//!
//! Inputs, read-only record snapshots and the derived results computed from
//! them. Results carry no identity: they are valid only for the snapshot they
//! were computed from.

use crate::domain::category::{EmissionCategory, Scope};
use crate::domain::value_objects::{Quantity, saturate};
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{EmissionRecordId, OwnerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One category-tagged activity amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionInput {
    pub category: EmissionCategory,
    #[serde(default)]
    pub quantity: Quantity,
    pub scope: Scope,
}

impl EmissionInput {
    pub fn new(category: EmissionCategory, quantity: impl Into<Quantity>, scope: Scope) -> Self {
        Self {
            category,
            quantity: quantity.into(),
            scope,
        }
    }

    /// Input reported under the category's default scope
    pub fn with_default_scope(category: EmissionCategory, quantity: impl Into<Quantity>) -> Self {
        Self::new(category, quantity, category.default_scope())
    }
}

/// Per-scope and per-category kg CO2e
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub scope1: f64,
    pub scope2: f64,
    pub scope3: f64,
    pub total: f64,
    pub by_category: BTreeMap<EmissionCategory, f64>,
}

impl AggregationResult {
    /// Add one line. Amounts are expected to be `>= 0`.
    ///
    /// Sums saturate at `f64::MAX`.
    pub(crate) fn add(&mut self, category: EmissionCategory, scope: Scope, kg: f64) {
        let bucket = match scope {
            Scope::One => &mut self.scope1,
            Scope::Two => &mut self.scope2,
            Scope::Three => &mut self.scope3,
        };
        *bucket = saturate(*bucket + kg);
        let by_category = self.by_category.entry(category).or_insert(0.0);
        *by_category = saturate(*by_category + kg);
        self.total = saturate(self.scope1 + self.scope2 + self.scope3);
    }

    pub fn scope(&self, scope: Scope) -> f64 {
        match scope {
            Scope::One => self.scope1,
            Scope::Two => self.scope2,
            Scope::Three => self.scope3,
        }
    }

    /// Same result expressed in tonnes CO2e
    pub fn in_tonnes(&self) -> AggregationResult {
        let t = crate::domain::services::to_tonnes;
        AggregationResult {
            scope1: t(self.scope1),
            scope2: t(self.scope2),
            scope3: t(self.scope3),
            total: t(self.total),
            by_category: self
                .by_category
                .iter()
                .map(|(category, kg)| (*category, t(*kg)))
                .collect(),
        }
    }

    /// Percentage of the total per scope, for pie charts
    pub fn scope_shares(&self) -> ScopeShares {
        if self.total <= 0.0 {
            return ScopeShares::default();
        }
        let pct = |kg: f64| kg / self.total * 100.0;
        ScopeShares {
            scope1_pct: pct(self.scope1),
            scope2_pct: pct(self.scope2),
            scope3_pct: pct(self.scope3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeShares {
    pub scope1_pct: f64,
    pub scope2_pct: f64,
    pub scope3_pct: f64,
}

/// Presentation metrics derived from a result
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// Reduction versus the baseline, in percent. 0 without a usable baseline.
    pub reduction_pct: f64,
    /// Trees needed to absorb the total in one year
    pub tree_equivalent: u64,
}

/// Year-over-year comparison of two results
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub previous_total: f64,
    pub current_total: f64,
    /// `current - previous`; negative means emissions went down
    pub delta_kg: f64,
    /// Change relative to `previous`, in percent. 0 when `previous` is 0.
    pub change_pct: f64,
}

/// Persisted emission entry, as delivered by the record store
///
/// Owned by the persistence collaborator. This crate only reads snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionRecord {
    pub id: EmissionRecordId,
    pub owner: OwnerId,
    pub category: EmissionCategory,
    pub scope: Scope,
    pub quantity: f64,
    pub unit: String,
    pub emission_factor: f64,
    pub co2e: f64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// One point of a monthly time series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// `YYYY-MM`
    pub month: String,
    pub co2e: f64,
}
