//! Emission Factor Tables
//!
//! A table is built once and passed by reference to every calculation. It is
//! never a process global, so alternate factor sets can be injected freely.

use crate::domain::category::{EmissionCategory, FleetVehicle};
use crate::error::{EmissionsError, EmissionsResult};
use serde::Serialize;
use std::collections::HashMap;

/// kg CO2e per unit of activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionFactor {
    pub value: f64,
    pub unit: &'static str,
}

impl EmissionFactor {
    pub const fn new(value: f64, unit: &'static str) -> Self {
        Self { value, unit }
    }
}

/// Built-in factor set (kg CO2e per unit)
const STANDARD_FACTORS: &[(EmissionCategory, f64, &str)] = &[
    (EmissionCategory::Electricity, 0.82, "kg CO2e/kWh"),
    (EmissionCategory::NaturalGas, 2.0, "kg CO2e/m3"),
    (EmissionCategory::Diesel, 2.68, "kg CO2e/L"),
    (EmissionCategory::Petrol, 2.31, "kg CO2e/L"),
    (EmissionCategory::Motorcycle, 0.103, "kg CO2e/km"),
    (EmissionCategory::Bus, 0.089, "kg CO2e/passenger-km"),
    (EmissionCategory::CarPetrol, 0.192, "kg CO2e/km"),
    (EmissionCategory::CarDiesel, 0.171, "kg CO2e/km"),
    (EmissionCategory::CarElectric, 0.053, "kg CO2e/km"),
    (EmissionCategory::DomesticFlight, 250.0, "kg CO2e/flight"),
    (EmissionCategory::InternationalFlight, 1100.0, "kg CO2e/flight"),
    (EmissionCategory::OfficeArea, 45.0, "kg CO2e/m2/year"),
    (EmissionCategory::IndustrialOutput, 1.8, "kg CO2e/unit"),
    (EmissionCategory::Fleet(FleetVehicle::Diesel), 0.27, "kg CO2e/km"),
    (EmissionCategory::Fleet(FleetVehicle::Petrol), 0.24, "kg CO2e/km"),
    (EmissionCategory::Fleet(FleetVehicle::Hybrid), 0.12, "kg CO2e/km"),
    (EmissionCategory::Fleet(FleetVehicle::Electric), 0.05, "kg CO2e/km"),
    (EmissionCategory::BusinessTravel, 0.15, "kg CO2e/km"),
    (EmissionCategory::Waste, 0.57, "kg CO2e/kg"),
];

/// Read-only factor lookup
///
/// Flat categories and fleet vehicles live in separate maps so that a missing
/// vehicle is reported as [`EmissionsError::UnknownVehicleType`] rather than
/// as a missing category.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactorTable {
    flat: HashMap<EmissionCategory, EmissionFactor>,
    fleet: HashMap<FleetVehicle, EmissionFactor>,
}

impl EmissionFactorTable {
    /// The built-in factor set. Covers every category.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for &(category, value, unit) in STANDARD_FACTORS {
            table.insert(category, EmissionFactor::new(value, unit));
        }
        table
    }

    fn empty() -> Self {
        Self {
            flat: HashMap::new(),
            fleet: HashMap::new(),
        }
    }

    fn insert(&mut self, category: EmissionCategory, factor: EmissionFactor) {
        match category {
            EmissionCategory::Fleet(vehicle) => {
                self.fleet.insert(vehicle, factor);
            }
            flat => {
                self.flat.insert(flat, factor);
            }
        }
    }

    pub fn builder() -> EmissionFactorTableBuilder {
        EmissionFactorTableBuilder::default()
    }

    /// Resolve the factor for a category, descending into the fleet table
    /// for fleet categories.
    pub fn factor(&self, category: EmissionCategory) -> EmissionsResult<EmissionFactor> {
        let found = match category {
            EmissionCategory::Fleet(vehicle) => self
                .fleet
                .get(&vehicle)
                .copied()
                .ok_or(EmissionsError::UnknownVehicleType(vehicle)),
            flat => self
                .flat
                .get(&flat)
                .copied()
                .ok_or(EmissionsError::UnknownCategory(flat)),
        };
        if let Err(err) = &found {
            tracing::error!(category = %category, error = %err, "Emission factor lookup failed");
        }
        found
    }

    /// Copy of this table with the electricity factor replaced, e.g. by a
    /// state grid factor.
    pub fn with_grid_factor(&self, kg_per_kwh: f64) -> EmissionsResult<Self> {
        let key = EmissionCategory::Electricity;
        validate_factor(&key.to_string(), kg_per_kwh)?;
        let mut table = self.clone();
        table.insert(key, EmissionFactor::new(kg_per_kwh, "kg CO2e/kWh"));
        Ok(table)
    }

    /// Number of configured factors, fleet entries included
    pub fn len(&self) -> usize {
        self.flat.len() + self.fleet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_factor(key: &str, value: f64) -> EmissionsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EmissionsError::InvalidFactor {
            key: key.to_string(),
            value,
        })
    }
}

/// Builder for alternate factor sets
#[derive(Debug, Default)]
pub struct EmissionFactorTableBuilder {
    entries: Vec<(EmissionCategory, EmissionFactor)>,
}

impl EmissionFactorTableBuilder {
    /// Add or replace a factor. Later entries win.
    pub fn factor(mut self, category: EmissionCategory, value: f64, unit: &'static str) -> Self {
        self.entries.push((category, EmissionFactor::new(value, unit)));
        self
    }

    /// Validate every factor and build the table.
    pub fn build(self) -> EmissionsResult<EmissionFactorTable> {
        let mut table = EmissionFactorTable::empty();
        for (category, factor) in self.entries {
            validate_factor(&category.to_string(), factor.value)?;
            table.insert(category, factor);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_covers_every_category() {
        let table = EmissionFactorTable::standard();
        for category in EmissionCategory::ALL {
            assert!(table.factor(category).is_ok(), "missing {category}");
        }
        assert_eq!(table.len(), EmissionCategory::ALL.len());
    }

    #[test]
    fn test_standard_reference_values() {
        let table = EmissionFactorTable::standard();
        let electricity = table.factor(EmissionCategory::Electricity).unwrap();
        assert_eq!(electricity.value, 0.82);
        assert_eq!(electricity.unit, "kg CO2e/kWh");
        assert_eq!(table.factor(EmissionCategory::NaturalGas).unwrap().value, 2.0);
    }

    #[test]
    fn test_missing_category_is_reported() {
        let table = EmissionFactorTable::builder()
            .factor(EmissionCategory::Electricity, 0.5, "kg CO2e/kWh")
            .build()
            .unwrap();
        assert_eq!(
            table.factor(EmissionCategory::Waste),
            Err(EmissionsError::UnknownCategory(EmissionCategory::Waste))
        );
    }

    #[test]
    fn test_missing_fleet_vehicle_is_reported() {
        let table = EmissionFactorTable::builder()
            .factor(EmissionCategory::Fleet(FleetVehicle::Diesel), 0.3, "kg CO2e/km")
            .build()
            .unwrap();
        assert!(table.factor(EmissionCategory::Fleet(FleetVehicle::Diesel)).is_ok());
        assert_eq!(
            table.factor(EmissionCategory::Fleet(FleetVehicle::Electric)),
            Err(EmissionsError::UnknownVehicleType(FleetVehicle::Electric))
        );
    }

    #[test]
    fn test_builder_rejects_invalid_factors() {
        for bad in [-0.1, f64::NAN, f64::INFINITY] {
            let result = EmissionFactorTable::builder()
                .factor(EmissionCategory::Waste, bad, "kg CO2e/kg")
                .build();
            assert!(
                matches!(result, Err(EmissionsError::InvalidFactor { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_builder_later_entries_win() {
        let table = EmissionFactorTable::builder()
            .factor(EmissionCategory::Waste, 1.0, "kg CO2e/kg")
            .factor(EmissionCategory::Waste, 2.0, "kg CO2e/kg")
            .build()
            .unwrap();
        assert_eq!(table.factor(EmissionCategory::Waste).unwrap().value, 2.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_with_grid_factor() {
        let table = EmissionFactorTable::standard().with_grid_factor(0.45).unwrap();
        assert_eq!(table.factor(EmissionCategory::Electricity).unwrap().value, 0.45);
        // Other factors untouched
        assert_eq!(table.factor(EmissionCategory::NaturalGas).unwrap().value, 2.0);

        assert!(EmissionFactorTable::standard().with_grid_factor(-1.0).is_err());
    }
}
