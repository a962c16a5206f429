//! Domain Services
//!
//! Pure emissions arithmetic. Nothing here reads the clock, touches global
//! state or performs I/O.
//!
//! Sums are plain `f64` additions, so reordering inputs can change the least
//! significant bits of a result. Callers comparing results should use a
//! relative tolerance (the test suite uses `1e-9`).
//!
//! Results never overflow to infinity: products, sums and percentages
//! saturate at `±f64::MAX`.

use crate::domain::category::EmissionCategory;
use crate::domain::entities::{
    AggregationResult, DerivedMetrics, EmissionInput, EmissionRecord, MonthlyPoint,
    PeriodComparison,
};
use crate::domain::factors::EmissionFactorTable;
use crate::domain::value_objects::{Quantity, saturate};
use crate::error::EmissionsResult;
use chrono::Datelike;
use std::collections::BTreeMap;

/// Default kg CO2e absorbed by one tree in one year
pub const TREE_ABSORPTION_KG_PER_YEAR: f64 = 21.0;

/// kg CO2e of one activity line
///
/// The quantity is already sanitized, so the result is always finite and
/// `>= 0`. Fails only when the table lacks the category.
pub fn compute_line_emission(
    table: &EmissionFactorTable,
    category: EmissionCategory,
    quantity: impl Into<Quantity>,
) -> EmissionsResult<f64> {
    let factor = table.factor(category)?;
    Ok(saturate(quantity.into().value() * factor.value))
}

/// Sum inputs per scope and per category
///
/// An empty input yields the all-zero result. Any category missing from the
/// table fails the whole aggregation; a partial result is never returned.
pub fn aggregate(
    table: &EmissionFactorTable,
    inputs: &[EmissionInput],
) -> EmissionsResult<AggregationResult> {
    let mut result = AggregationResult::default();
    for input in inputs {
        let kg = compute_line_emission(table, input.category, input.quantity)?;
        result.add(input.category, input.scope, kg);
    }

    tracing::debug!(
        lines = inputs.len(),
        total_kg = result.total,
        "Aggregated emissions"
    );

    Ok(result)
}

/// Reduction against a baseline and tree equivalent at the default
/// absorption ratio
///
/// A missing, zero, negative or non-finite baseline cannot support a
/// percentage, so `reduction_pct` is reported as 0.
pub fn derive_metrics(result: &AggregationResult, baseline: Option<f64>) -> DerivedMetrics {
    derive_metrics_with(result, baseline, TREE_ABSORPTION_KG_PER_YEAR)
}

/// [`derive_metrics`] with an explicit kg CO2e absorbed per tree per year
pub fn derive_metrics_with(
    result: &AggregationResult,
    baseline: Option<f64>,
    kg_per_tree: f64,
) -> DerivedMetrics {
    let reduction_pct = match baseline {
        Some(base) if base.is_finite() && base > 0.0 => {
            saturate((base - result.total) / base * 100.0)
        }
        _ => 0.0,
    };
    DerivedMetrics {
        reduction_pct,
        tree_equivalent: tree_equivalent_with(result.total, kg_per_tree),
    }
}

/// Trees needed to absorb `kg` CO2e in a year, rounded up
pub fn tree_equivalent(kg: f64) -> u64 {
    tree_equivalent_with(kg, TREE_ABSORPTION_KG_PER_YEAR)
}

/// Trees needed at `kg_per_tree` absorption, rounded up
///
/// Counts beyond `u64::MAX` saturate. A non-positive ratio absorbs nothing
/// and yields 0.
pub fn tree_equivalent_with(kg: f64, kg_per_tree: f64) -> u64 {
    if kg.is_finite() && kg > 0.0 && kg_per_tree.is_finite() && kg_per_tree > 0.0 {
        // `as` saturates on out-of-range floats
        (kg / kg_per_tree).ceil() as u64
    } else {
        0
    }
}

/// kg -> tonnes
#[inline]
pub fn to_tonnes(kg: f64) -> f64 {
    kg / 1000.0
}

/// Compare two periods (typically consecutive years)
pub fn compare_periods(
    previous: &AggregationResult,
    current: &AggregationResult,
) -> PeriodComparison {
    let delta_kg = saturate(current.total - previous.total);
    let change_pct = if previous.total > 0.0 {
        saturate(delta_kg / previous.total * 100.0)
    } else {
        0.0
    };
    PeriodComparison {
        previous_total: previous.total,
        current_total: current.total,
        delta_kg,
        change_pct,
    }
}

/// Summarize a record snapshot using the stored `co2e` of each record
///
/// Stored values are trusted as computed by the writer, except that
/// negative or non-finite amounts are clamped to zero.
pub fn summarize_records(records: &[EmissionRecord]) -> AggregationResult {
    let mut result = AggregationResult::default();
    for record in records {
        result.add(record.category, record.scope, sanitize_stored(record.co2e));
    }
    result
}

/// Monthly totals in ascending `YYYY-MM` order, for line and area charts
///
/// Months without records are omitted.
pub fn monthly_series(records: &[EmissionRecord]) -> Vec<MonthlyPoint> {
    let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for record in records {
        let month = months
            .entry((record.date.year(), record.date.month()))
            .or_insert(0.0);
        *month = saturate(*month + sanitize_stored(record.co2e));
    }
    months
        .into_iter()
        .map(|((year, month), co2e)| MonthlyPoint {
            month: format!("{year:04}-{month:02}"),
            co2e,
        })
        .collect()
}

fn sanitize_stored(co2e: f64) -> f64 {
    Quantity::new(co2e).value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Scope;

    #[test]
    fn test_line_emission() {
        let table = EmissionFactorTable::standard();
        let kg = compute_line_emission(&table, EmissionCategory::NaturalGas, 1000.0).unwrap();
        assert_eq!(kg, 2000.0);
    }

    #[test]
    fn test_line_emission_coerces_text() {
        let table = EmissionFactorTable::standard();
        for raw in ["", "abc", "0", "-50"] {
            let kg = compute_line_emission(&table, EmissionCategory::Electricity, raw).unwrap();
            assert_eq!(kg, 0.0, "{raw:?}");
        }
    }

    #[test]
    fn test_derive_metrics_baseline_guard() {
        let mut result = AggregationResult::default();
        result.add(EmissionCategory::Electricity, Scope::Two, 80.0);

        assert_eq!(derive_metrics(&result, Some(100.0)).reduction_pct, 20.0);
        assert_eq!(derive_metrics(&result, Some(0.0)).reduction_pct, 0.0);
        assert_eq!(derive_metrics(&result, None).reduction_pct, 0.0);
        assert_eq!(derive_metrics(&result, Some(-5.0)).reduction_pct, 0.0);
        assert_eq!(derive_metrics(&result, Some(f64::NAN)).reduction_pct, 0.0);

        // Emissions above the baseline give a negative reduction
        assert_eq!(derive_metrics(&result, Some(40.0)).reduction_pct, -100.0);
    }

    #[test]
    fn test_tree_equivalent_rounds_up() {
        assert_eq!(tree_equivalent(0.0), 0);
        assert_eq!(tree_equivalent(1.0), 1);
        assert_eq!(tree_equivalent(21.0), 1);
        assert_eq!(tree_equivalent(21.5), 2);
        assert_eq!(tree_equivalent(6100.0), 291);
        assert_eq!(tree_equivalent(f64::NAN), 0);
    }

    #[test]
    fn test_tree_equivalent_with_ratio() {
        assert_eq!(tree_equivalent_with(6100.0, 25.0), 244);
        assert_eq!(tree_equivalent_with(6100.0, 0.0), 0);
        assert_eq!(tree_equivalent_with(6100.0, -21.0), 0);
        assert_eq!(tree_equivalent_with(6100.0, f64::NAN), 0);
        assert_eq!(tree_equivalent_with(f64::MAX, 1e-300), u64::MAX);
    }

    #[test]
    fn test_line_emission_saturates() {
        let table = EmissionFactorTable::standard();
        let kg = compute_line_emission(&table, EmissionCategory::InternationalFlight, 1e307).unwrap();
        assert_eq!(kg, f64::MAX);
    }

    #[test]
    fn test_compare_periods() {
        let mut previous = AggregationResult::default();
        previous.add(EmissionCategory::Electricity, Scope::Two, 200.0);
        let mut current = AggregationResult::default();
        current.add(EmissionCategory::Electricity, Scope::Two, 150.0);

        let cmp = compare_periods(&previous, &current);
        assert_eq!(cmp.delta_kg, -50.0);
        assert_eq!(cmp.change_pct, -25.0);

        let from_zero = compare_periods(&AggregationResult::default(), &current);
        assert_eq!(from_zero.delta_kg, 150.0);
        assert_eq!(from_zero.change_pct, 0.0);
    }
}
