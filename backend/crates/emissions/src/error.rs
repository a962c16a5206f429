//! Emissions Error Types
//!
//! Domain errors that integrate with the unified `kernel::error::AppError`
//! system. Malformed user quantities never reach this type: they are coerced
//! to zero by [`crate::domain::value_objects::Quantity`].

use crate::domain::category::{EmissionCategory, FleetVehicle};
use crate::domain::gstin::GstinRejection;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Emissions result type alias
pub type EmissionsResult<T> = Result<T, EmissionsError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmissionsError {
    /// The factor table has no entry for a category (configuration gap)
    #[error("No emission factor configured for category '{0}'")]
    UnknownCategory(EmissionCategory),

    /// The nested fleet table has no entry for a vehicle type (configuration gap)
    #[error("No emission factor configured for fleet vehicle '{0}'")]
    UnknownVehicleType(FleetVehicle),

    /// A factor table was built with a negative or non-finite value
    #[error("Invalid emission factor for '{key}': {value}")]
    InvalidFactor { key: String, value: f64 },

    /// A GSTIN failed format or checksum validation
    #[error("Invalid GSTIN: {0}")]
    InvalidGstin(GstinRejection),

    /// No grid factor is known for the requested state
    #[error("Unknown state or union territory: {0}")]
    UnknownState(String),
}

impl EmissionsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmissionsError::UnknownCategory(_)
            | EmissionsError::UnknownVehicleType(_)
            | EmissionsError::InvalidFactor { .. } => ErrorKind::InternalServerError,
            EmissionsError::InvalidGstin(_) => ErrorKind::UnprocessableEntity,
            EmissionsError::UnknownState(_) => ErrorKind::NotFound,
        }
    }

    /// Configuration gaps point at the factor data, not at the caller.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EmissionsError::UnknownCategory(_)
                | EmissionsError::UnknownVehicleType(_)
                | EmissionsError::InvalidFactor { .. }
        )
    }

    fn log(&self) {
        if self.is_configuration_error() {
            tracing::error!(error = %self, "Emission factor configuration error");
        } else {
            tracing::debug!(error = %self, "Emissions request rejected");
        }
    }
}

impl From<EmissionsError> for AppError {
    fn from(err: EmissionsError) -> Self {
        err.log();
        let kind = err.kind();
        let app_err = AppError::new(kind, err.to_string());
        let app_err = match &err {
            EmissionsError::InvalidGstin(_) => {
                app_err.with_action("Check the GSTIN and enter all 15 characters")
            }
            _ => app_err,
        };
        app_err.with_source(err)
    }
}
