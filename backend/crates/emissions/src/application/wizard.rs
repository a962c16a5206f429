//! Calculator Wizard
//!
//! The multi-step calculator collects answers one step at a time. Answers
//! are an immutable value: each `with_*` call returns a new one, and nothing
//! here knows about step navigation.

use crate::domain::category::{EmissionCategory, FleetVehicle};
use crate::domain::entities::{AggregationResult, EmissionInput};
use crate::domain::factors::EmissionFactorTable;
use crate::domain::services::aggregate;
use crate::domain::value_objects::Quantity;
use crate::error::EmissionsResult;
use serde::{Deserialize, Serialize};

/// Annual activity figures collected by the wizard
///
/// Unanswered fields are zero. All quantities are already annual.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardAnswers {
    // Energy
    pub electricity_kwh: Quantity,
    pub natural_gas_m3: Quantity,
    // Fuel
    pub diesel_litres: Quantity,
    pub petrol_litres: Quantity,
    // Fleet
    pub fleet_distance_km: Quantity,
    pub fleet_vehicle: FleetVehicle,
    // Travel
    pub business_travel_km: Quantity,
    pub domestic_flights: Quantity,
    pub international_flights: Quantity,
    // Facilities
    pub office_area_m2: Quantity,
    pub industrial_output_units: Quantity,
    pub waste_kg: Quantity,
}

impl WizardAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_electricity(self, kwh: impl Into<Quantity>) -> Self {
        Self {
            electricity_kwh: kwh.into(),
            ..self
        }
    }

    pub fn with_natural_gas(self, m3: impl Into<Quantity>) -> Self {
        Self {
            natural_gas_m3: m3.into(),
            ..self
        }
    }

    pub fn with_diesel(self, litres: impl Into<Quantity>) -> Self {
        Self {
            diesel_litres: litres.into(),
            ..self
        }
    }

    pub fn with_petrol(self, litres: impl Into<Quantity>) -> Self {
        Self {
            petrol_litres: litres.into(),
            ..self
        }
    }

    pub fn with_fleet(self, distance_km: impl Into<Quantity>, vehicle: FleetVehicle) -> Self {
        Self {
            fleet_distance_km: distance_km.into(),
            fleet_vehicle: vehicle,
            ..self
        }
    }

    pub fn with_business_travel(self, km: impl Into<Quantity>) -> Self {
        Self {
            business_travel_km: km.into(),
            ..self
        }
    }

    pub fn with_flights(
        self,
        domestic: impl Into<Quantity>,
        international: impl Into<Quantity>,
    ) -> Self {
        Self {
            domestic_flights: domestic.into(),
            international_flights: international.into(),
            ..self
        }
    }

    pub fn with_office_area(self, m2: impl Into<Quantity>) -> Self {
        Self {
            office_area_m2: m2.into(),
            ..self
        }
    }

    pub fn with_industrial_output(self, units: impl Into<Quantity>) -> Self {
        Self {
            industrial_output_units: units.into(),
            ..self
        }
    }

    pub fn with_waste(self, kg: impl Into<Quantity>) -> Self {
        Self {
            waste_kg: kg.into(),
            ..self
        }
    }

    /// One input per wizard field, each under its category's default scope
    pub fn into_inputs(self) -> Vec<EmissionInput> {
        use EmissionCategory::*;
        [
            (Electricity, self.electricity_kwh),
            (NaturalGas, self.natural_gas_m3),
            (Diesel, self.diesel_litres),
            (Petrol, self.petrol_litres),
            (Fleet(self.fleet_vehicle), self.fleet_distance_km),
            (BusinessTravel, self.business_travel_km),
            (DomesticFlight, self.domestic_flights),
            (InternationalFlight, self.international_flights),
            (OfficeArea, self.office_area_m2),
            (IndustrialOutput, self.industrial_output_units),
            (Waste, self.waste_kg),
        ]
        .into_iter()
        .map(|(category, quantity)| EmissionInput::with_default_scope(category, quantity))
        .collect()
    }

    pub fn calculate(self, table: &EmissionFactorTable) -> EmissionsResult<AggregationResult> {
        aggregate(table, &self.into_inputs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Scope;

    #[test]
    fn test_builder_is_immutable() {
        let first = WizardAnswers::new().with_electricity(100.0);
        let second = first.with_natural_gas(5.0);

        assert!(first.natural_gas_m3.is_zero());
        assert_eq!(second.electricity_kwh.value(), 100.0);
        assert_eq!(second.natural_gas_m3.value(), 5.0);
    }

    #[test]
    fn test_empty_wizard_is_zero() {
        let result = WizardAnswers::new()
            .calculate(&EmissionFactorTable::standard())
            .unwrap();
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn test_inputs_use_default_scopes() {
        let inputs = WizardAnswers::new()
            .with_fleet(100.0, FleetVehicle::Hybrid)
            .into_inputs();
        let fleet = inputs
            .iter()
            .find(|i| i.category == EmissionCategory::Fleet(FleetVehicle::Hybrid))
            .unwrap();
        assert_eq!(fleet.scope, Scope::One);
        assert_eq!(fleet.quantity.value(), 100.0);
        assert_eq!(inputs.len(), 11);
    }

    #[test]
    fn test_fleet_vehicle_selects_factor() {
        let table = EmissionFactorTable::standard();
        let diesel = WizardAnswers::new()
            .with_fleet(1000.0, FleetVehicle::Diesel)
            .calculate(&table)
            .unwrap();
        let electric = WizardAnswers::new()
            .with_fleet(1000.0, FleetVehicle::Electric)
            .calculate(&table)
            .unwrap();
        assert!((diesel.scope1 - 270.0).abs() < 1e-9);
        assert!((electric.scope1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_vehicle_factor_fails_loudly() {
        let table = EmissionFactorTable::builder()
            .factor(EmissionCategory::Electricity, 0.82, "kg CO2e/kWh")
            .build()
            .unwrap();
        assert!(WizardAnswers::new().calculate(&table).is_err());
    }

    #[test]
    fn test_deserialize_partial_answers() {
        let answers: WizardAnswers = serde_json::from_str(
            r#"{"electricityKwh":"5000","naturalGasM3":1000,"fleetVehicle":"petrol","dieselLitres":""}"#,
        )
        .unwrap();
        assert_eq!(answers.electricity_kwh.value(), 5000.0);
        assert_eq!(answers.natural_gas_m3.value(), 1000.0);
        assert_eq!(answers.fleet_vehicle, FleetVehicle::Petrol);
        assert!(answers.diesel_litres.is_zero());
        assert!(answers.waste_kg.is_zero());
    }
}
