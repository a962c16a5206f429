//! Application Configuration
//!
//! Configuration for the emissions calculators.

use crate::domain::entities::{AggregationResult, DerivedMetrics};
use crate::domain::factors::EmissionFactorTable;
use crate::domain::grid::grid_factor_for;
use crate::domain::services::{TREE_ABSORPTION_KG_PER_YEAR, derive_metrics_with};
use crate::error::{EmissionsError, EmissionsResult};

/// Emissions application configuration
#[derive(Debug, Clone)]
pub struct EmissionsConfig {
    /// Factor table injected into every calculation
    pub factors: EmissionFactorTable,
    /// State whose grid factor replaced the electricity factor, if any
    pub grid_state: Option<String>,
    /// Baseline used for reduction metrics when a request has none (kg CO2e)
    pub default_baseline_kg: Option<f64>,
    /// kg CO2e one tree absorbs per year, for tree equivalents. Always finite and > 0.
    pub tree_absorption_kg: f64,
}

impl Default for EmissionsConfig {
    fn default() -> Self {
        Self {
            factors: EmissionFactorTable::standard(),
            grid_state: None,
            default_baseline_kg: None,
            tree_absorption_kg: TREE_ABSORPTION_KG_PER_YEAR,
        }
    }
}

impl EmissionsConfig {
    /// Standard factors with electricity priced at a state's grid factor
    pub fn for_state(state: &str) -> EmissionsResult<Self> {
        let grid = grid_factor_for(state)?;
        let factors = EmissionFactorTable::standard().with_grid_factor(grid.factor)?;

        tracing::info!(
            state = grid.state,
            factor = grid.factor,
            "Using state grid emission factor"
        );

        Ok(Self {
            factors,
            grid_state: Some(grid.state.to_string()),
            ..Self::default()
        })
    }

    pub fn with_default_baseline(self, baseline_kg: f64) -> Self {
        Self {
            default_baseline_kg: Some(baseline_kg),
            ..self
        }
    }

    /// Override the tree absorption ratio. Rejects zero, negative and
    /// non-finite values.
    pub fn with_tree_absorption(self, kg_per_tree: f64) -> EmissionsResult<Self> {
        if !(kg_per_tree.is_finite() && kg_per_tree > 0.0) {
            return Err(EmissionsError::InvalidFactor {
                key: "treeAbsorption".to_string(),
                value: kg_per_tree,
            });
        }
        Ok(Self {
            tree_absorption_kg: kg_per_tree,
            ..self
        })
    }

    /// Request baseline, falling back to the configured default
    pub fn baseline_or_default(&self, requested: Option<f64>) -> Option<f64> {
        requested.or(self.default_baseline_kg)
    }

    /// Metrics for a result under this configuration's baseline and tree ratio
    pub fn metrics(&self, result: &AggregationResult, requested_baseline: Option<f64>) -> DerivedMetrics {
        derive_metrics_with(
            result,
            self.baseline_or_default(requested_baseline),
            self.tree_absorption_kg,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{EmissionCategory, Scope};

    #[test]
    fn test_default_config() {
        let config = EmissionsConfig::default();
        assert_eq!(config.factors, EmissionFactorTable::standard());
        assert!(config.grid_state.is_none());
        assert!(config.default_baseline_kg.is_none());
        assert_eq!(config.tree_absorption_kg, 21.0);
    }

    #[test]
    fn test_for_state() {
        let config = EmissionsConfig::for_state("Kerala").unwrap();
        assert_eq!(config.grid_state.as_deref(), Some("Kerala"));
        assert_eq!(
            config.factors.factor(EmissionCategory::Electricity).unwrap().value,
            0.45
        );
        assert!(EmissionsConfig::for_state("Narnia").is_err());
    }

    #[test]
    fn test_baseline_fallback() {
        let config = EmissionsConfig::default().with_default_baseline(1000.0);
        assert_eq!(config.baseline_or_default(None), Some(1000.0));
        assert_eq!(config.baseline_or_default(Some(50.0)), Some(50.0));
    }

    #[test]
    fn test_tree_absorption_override() {
        let config = EmissionsConfig::default().with_tree_absorption(25.0).unwrap();
        assert_eq!(config.tree_absorption_kg, 25.0);

        let mut result = AggregationResult::default();
        result.add(EmissionCategory::Electricity, Scope::Two, 6100.0);
        assert_eq!(config.metrics(&result, None).tree_equivalent, 244);
        assert_eq!(EmissionsConfig::default().metrics(&result, None).tree_equivalent, 291);
    }

    #[test]
    fn test_tree_absorption_rejects_unusable_ratio() {
        for bad in [0.0, -21.0, f64::NAN, f64::INFINITY] {
            let err = EmissionsConfig::default().with_tree_absorption(bad).unwrap_err();
            assert!(matches!(err, EmissionsError::InvalidFactor { .. }), "{bad}");
        }
    }

    #[test]
    fn test_metrics_uses_default_baseline() {
        let config = EmissionsConfig::default().with_default_baseline(1000.0);
        let mut result = AggregationResult::default();
        result.add(EmissionCategory::Electricity, Scope::Two, 800.0);
        assert_eq!(config.metrics(&result, None).reduction_pct, 20.0);
        assert_eq!(config.metrics(&result, Some(1600.0)).reduction_pct, 50.0);
    }
}
