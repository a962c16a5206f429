//! Emission categories and GHG Protocol scopes

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GHG Protocol scope
///
/// Serialized as the bare integer `1`, `2` or `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Scope {
    /// Direct emissions from owned sources
    #[display("scope 1")]
    One = 1,
    /// Indirect emissions from purchased energy
    #[display("scope 2")]
    Two = 2,
    /// Other value-chain emissions
    #[display("scope 3")]
    Three = 3,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::One, Scope::Two, Scope::Three];

    #[inline]
    pub const fn number(&self) -> u8 {
        *self as u8
    }

    #[inline]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Scope::One),
            2 => Some(Scope::Two),
            3 => Some(Scope::Three),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Scope {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Scope::from_number(n).ok_or_else(|| format!("scope must be 1, 2 or 3 (got {n})"))
    }
}

impl From<Scope> for u8 {
    fn from(scope: Scope) -> Self {
        scope.number()
    }
}

/// Vehicle type of a company fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FleetVehicle {
    #[default]
    #[display("diesel")]
    Diesel,
    #[display("petrol")]
    Petrol,
    #[display("hybrid")]
    Hybrid,
    #[display("electric")]
    Electric,
}

impl FleetVehicle {
    pub const ALL: [FleetVehicle; 4] = [
        FleetVehicle::Diesel,
        FleetVehicle::Petrol,
        FleetVehicle::Hybrid,
        FleetVehicle::Electric,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        use FleetVehicle::*;
        match code {
            "diesel" => Some(Diesel),
            "petrol" => Some(Petrol),
            "hybrid" => Some(Hybrid),
            "electric" => Some(Electric),
            _ => None,
        }
    }
}

/// Activity category with a fixed emission factor
///
/// The textual form (`naturalGas`, `fleet.hybrid`, ...) is also the serde
/// form, so categories can key JSON objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EmissionCategory {
    Electricity,
    NaturalGas,
    Diesel,
    Petrol,
    Motorcycle,
    Bus,
    CarPetrol,
    CarDiesel,
    CarElectric,
    DomesticFlight,
    InternationalFlight,
    OfficeArea,
    IndustrialOutput,
    Fleet(FleetVehicle),
    BusinessTravel,
    Waste,
}

const FLEET_PREFIX: &str = "fleet.";

impl EmissionCategory {
    /// Every category, fleet variants included
    pub const ALL: [EmissionCategory; 19] = [
        EmissionCategory::Electricity,
        EmissionCategory::NaturalGas,
        EmissionCategory::Diesel,
        EmissionCategory::Petrol,
        EmissionCategory::Motorcycle,
        EmissionCategory::Bus,
        EmissionCategory::CarPetrol,
        EmissionCategory::CarDiesel,
        EmissionCategory::CarElectric,
        EmissionCategory::DomesticFlight,
        EmissionCategory::InternationalFlight,
        EmissionCategory::OfficeArea,
        EmissionCategory::IndustrialOutput,
        EmissionCategory::Fleet(FleetVehicle::Diesel),
        EmissionCategory::Fleet(FleetVehicle::Petrol),
        EmissionCategory::Fleet(FleetVehicle::Hybrid),
        EmissionCategory::Fleet(FleetVehicle::Electric),
        EmissionCategory::BusinessTravel,
        EmissionCategory::Waste,
    ];

    /// Category code without the vehicle suffix. Fleet categories are
    /// written as `fleet.<vehicle>` by [`fmt::Display`].
    pub const fn code(&self) -> &'static str {
        use EmissionCategory::*;
        match self {
            Electricity => "electricity",
            NaturalGas => "naturalGas",
            Diesel => "diesel",
            Petrol => "petrol",
            Motorcycle => "motorcycle",
            Bus => "bus",
            CarPetrol => "carPetrol",
            CarDiesel => "carDiesel",
            CarElectric => "carElectric",
            DomesticFlight => "domesticFlight",
            InternationalFlight => "internationalFlight",
            OfficeArea => "officeArea",
            IndustrialOutput => "industrialOutput",
            Fleet(_) => "fleet",
            BusinessTravel => "businessTravel",
            Waste => "waste",
        }
    }

    /// Scope a category is reported under when the caller does not say.
    pub const fn default_scope(&self) -> Scope {
        use EmissionCategory::*;
        match self {
            NaturalGas | Diesel | Petrol | Fleet(_) => Scope::One,
            Electricity => Scope::Two,
            Motorcycle | Bus | CarPetrol | CarDiesel | CarElectric | DomesticFlight
            | InternationalFlight | OfficeArea | IndustrialOutput | BusinessTravel | Waste => {
                Scope::Three
            }
        }
    }

    #[inline]
    pub const fn is_fleet(&self) -> bool {
        matches!(self, EmissionCategory::Fleet(_))
    }
}

impl fmt::Display for EmissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmissionCategory::Fleet(vehicle) => write!(f, "{FLEET_PREFIX}{vehicle}"),
            other => f.write_str(other.code()),
        }
    }
}

/// Error returned when a category key cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized emission category '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for EmissionCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(vehicle) = s.strip_prefix(FLEET_PREFIX) {
            return FleetVehicle::from_code(vehicle)
                .map(EmissionCategory::Fleet)
                .ok_or_else(|| ParseCategoryError(s.to_string()));
        }
        EmissionCategory::ALL
            .iter()
            .find(|category| !category.is_fleet() && category.code() == s)
            .copied()
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl TryFrom<String> for EmissionCategory {
    type Error = ParseCategoryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EmissionCategory> for String {
    fn from(category: EmissionCategory) -> Self {
        category.to_string()
    }
}
