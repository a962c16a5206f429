//! Quick Calculators
//!
//! Single-purpose annual estimates for the landing-page calculators.

use crate::application::config::EmissionsConfig;
use crate::domain::category::EmissionCategory;
use crate::domain::factors::EmissionFactorTable;
use crate::domain::services::{
    TREE_ABSORPTION_KG_PER_YEAR, compute_line_emission, to_tonnes, tree_equivalent_with,
};
use crate::domain::value_objects::{Period, Quantity, saturate};
use crate::error::EmissionsResult;
use serde::Serialize;

/// Annual estimate of one quick calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickEstimate {
    pub annual_kg: f64,
    pub annual_tonnes: f64,
    pub tree_equivalent: u64,
}

impl QuickEstimate {
    fn from_kg(annual_kg: f64, kg_per_tree: f64) -> Self {
        Self {
            annual_kg,
            annual_tonnes: to_tonnes(annual_kg),
            tree_equivalent: tree_equivalent_with(annual_kg, kg_per_tree),
        }
    }
}

pub struct QuickCalculators<'a> {
    table: &'a EmissionFactorTable,
    kg_per_tree: f64,
}

impl<'a> QuickCalculators<'a> {
    /// Calculators over `table` at the default tree absorption ratio
    pub fn new(table: &'a EmissionFactorTable) -> Self {
        Self {
            table,
            kg_per_tree: TREE_ABSORPTION_KG_PER_YEAR,
        }
    }

    pub fn from_config(config: &'a EmissionsConfig) -> Self {
        Self {
            table: &config.factors,
            kg_per_tree: config.tree_absorption_kg,
        }
    }

    /// Household electricity from a monthly bill
    pub fn electricity(&self, monthly_kwh: impl Into<Quantity>) -> EmissionsResult<QuickEstimate> {
        self.annualized(EmissionCategory::Electricity, monthly_kwh.into(), Period::Monthly)
    }

    /// Fuel burnt per month (diesel, petrol, natural gas)
    pub fn fuel(
        &self,
        category: EmissionCategory,
        per_month: impl Into<Quantity>,
    ) -> EmissionsResult<QuickEstimate> {
        self.annualized(category, per_month.into(), Period::Monthly)
    }

    /// Daily commute by vehicle category over `days_per_year` commuting days
    pub fn commute(
        &self,
        category: EmissionCategory,
        km_per_day: impl Into<Quantity>,
        days_per_year: u32,
    ) -> EmissionsResult<QuickEstimate> {
        let annual_km = km_per_day.into().scaled(f64::from(days_per_year));
        let kg = compute_line_emission(self.table, category, annual_km)?;
        Ok(self.estimate(kg))
    }

    /// Flights taken per year
    pub fn flights(
        &self,
        domestic: impl Into<Quantity>,
        international: impl Into<Quantity>,
    ) -> EmissionsResult<QuickEstimate> {
        let kg = compute_line_emission(self.table, EmissionCategory::DomesticFlight, domestic)?
            + compute_line_emission(self.table, EmissionCategory::InternationalFlight, international)?;
        Ok(self.estimate(saturate(kg)))
    }

    fn annualized(
        &self,
        category: EmissionCategory,
        quantity: Quantity,
        period: Period,
    ) -> EmissionsResult<QuickEstimate> {
        let kg = compute_line_emission(self.table, category, period.annualize(quantity))?;
        Ok(self.estimate(kg))
    }

    fn estimate(&self, annual_kg: f64) -> QuickEstimate {
        QuickEstimate::from_kg(annual_kg, self.kg_per_tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_electricity_monthly_bill() {
        let table = EmissionFactorTable::standard();
        let estimate = QuickCalculators::new(&table).electricity(500.0).unwrap();
        assert!(approx(estimate.annual_kg, 4920.0));
        assert!(approx(estimate.annual_tonnes, 4.92));
        assert_eq!(estimate.tree_equivalent, 235);
    }

    #[test]
    fn test_electricity_untrusted_text() {
        let table = EmissionFactorTable::standard();
        let estimate = QuickCalculators::new(&table).electricity("").unwrap();
        assert_eq!(estimate.annual_kg, 0.0);
        assert_eq!(estimate.tree_equivalent, 0);
    }

    #[test]
    fn test_fuel() {
        let table = EmissionFactorTable::standard();
        let estimate = QuickCalculators::new(&table)
            .fuel(EmissionCategory::Petrol, 100.0)
            .unwrap();
        assert!(approx(estimate.annual_kg, 100.0 * 12.0 * 2.31));
    }

    #[test]
    fn test_commute() {
        let table = EmissionFactorTable::standard();
        let estimate = QuickCalculators::new(&table)
            .commute(EmissionCategory::Bus, 20.0, 250)
            .unwrap();
        assert!(approx(estimate.annual_kg, 20.0 * 250.0 * 0.089));
    }

    #[test]
    fn test_flights() {
        let table = EmissionFactorTable::standard();
        let estimate = QuickCalculators::new(&table).flights(2.0, "1").unwrap();
        assert!(approx(estimate.annual_kg, 2.0 * 250.0 + 1100.0));
    }

    #[test]
    fn test_config_tree_ratio() {
        let config = EmissionsConfig::default().with_tree_absorption(41.0).unwrap();
        let estimate = QuickCalculators::from_config(&config).electricity(500.0).unwrap();
        assert!(approx(estimate.annual_kg, 4920.0));
        assert_eq!(estimate.tree_equivalent, 120);
    }

    #[test]
    fn test_huge_monthly_bill_saturates() {
        let table = EmissionFactorTable::standard();
        // Twelve months of 1e308 kWh overflow before the factor is applied
        let estimate = QuickCalculators::new(&table).electricity(1e308).unwrap();
        assert!(estimate.annual_kg.is_finite());
        assert!(estimate.annual_kg > 1e307);
        assert_eq!(estimate.tree_equivalent, u64::MAX);
    }
}
