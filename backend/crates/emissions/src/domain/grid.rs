//! State grid emission factors
//!
//! Static lookup of electricity grid intensity for Indian states and union
//! territories, keyed by name or by GST state code.

use crate::error::{EmissionsError, EmissionsResult};
use serde::Serialize;

/// National average grid factor, kg CO2e/kWh
pub const NATIONAL_AVERAGE_KG_PER_KWH: f64 = 0.82;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateGridFactor {
    pub gst_state_code: &'static str,
    pub state: &'static str,
    /// kg CO2e/kWh
    pub factor: f64,
}

const STATE_GRID_FACTORS: &[StateGridFactor] = &[
    state("01", "Jammu and Kashmir", 0.35),
    state("02", "Himachal Pradesh", 0.12),
    state("03", "Punjab", 0.76),
    state("06", "Haryana", 0.86),
    state("07", "Delhi", 0.72),
    state("08", "Rajasthan", 0.84),
    state("09", "Uttar Pradesh", 0.89),
    state("10", "Bihar", 0.92),
    state("19", "West Bengal", 0.93),
    state("20", "Jharkhand", 0.97),
    state("21", "Odisha", 0.95),
    state("22", "Chhattisgarh", 0.98),
    state("23", "Madhya Pradesh", 0.91),
    state("24", "Gujarat", 0.81),
    state("27", "Maharashtra", 0.80),
    state("29", "Karnataka", 0.65),
    state("32", "Kerala", 0.45),
    state("33", "Tamil Nadu", 0.71),
    state("36", "Telangana", 0.84),
    state("37", "Andhra Pradesh", 0.82),
];

const fn state(gst_state_code: &'static str, name: &'static str, factor: f64) -> StateGridFactor {
    StateGridFactor {
        gst_state_code,
        state: name,
        factor,
    }
}

/// Every known state, in GST code order
pub fn all_states() -> &'static [StateGridFactor] {
    STATE_GRID_FACTORS
}

/// Look up by state name (case-insensitive, surrounding whitespace ignored)
/// or by two-digit GST state code.
pub fn grid_factor_for(state: &str) -> EmissionsResult<StateGridFactor> {
    let key = state.trim();
    STATE_GRID_FACTORS
        .iter()
        .find(|entry| entry.gst_state_code == key || entry.state.eq_ignore_ascii_case(key))
        .copied()
        .ok_or_else(|| EmissionsError::UnknownState(key.to_string()))
}

pub fn national_average() -> f64 {
    NATIONAL_AVERAGE_KG_PER_KWH
}
