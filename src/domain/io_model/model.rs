//! The loaded MRIO model.

use super::{CoefficientMatrix, FinalDemandMatrix, SatelliteAccount};
use crate::domain::foundation::{AxisIndex, ValidationError};

/// Coefficients, final demand and satellite account over one entity index.
#[derive(Debug, Clone, PartialEq)]
pub struct MrioModel {
    coefficients: CoefficientMatrix,
    final_demand: FinalDemandMatrix,
    satellite: SatelliteAccount,
}

impl MrioModel {
    pub fn new(
        coefficients: CoefficientMatrix,
        final_demand: FinalDemandMatrix,
        satellite: SatelliteAccount,
    ) -> Result<Self, ValidationError> {
        if coefficients.is_empty() {
            return Err(ValidationError::empty_field("coefficients"));
        }
        let entities = coefficients.entities();
        if final_demand.entities() != entities {
            return Err(ValidationError::invalid_format(
                "final_demand",
                "rows must use the coefficient matrix entity index",
            ));
        }
        if satellite.entities() != entities {
            return Err(ValidationError::invalid_format(
                "satellite",
                "columns must use the coefficient matrix entity index",
            ));
        }
        Ok(Self {
            coefficients,
            final_demand,
            satellite,
        })
    }

    pub fn entities(&self) -> &AxisIndex {
        self.coefficients.entities()
    }

    pub fn coefficients(&self) -> &CoefficientMatrix {
        &self.coefficients
    }

    pub fn final_demand(&self) -> &FinalDemandMatrix {
        &self.final_demand
    }

    pub fn satellite(&self) -> &SatelliteAccount {
        &self.satellite
    }

    /// Returns the model with a replaced satellite account.
    pub fn with_satellite(self, satellite: SatelliteAccount) -> Result<Self, ValidationError> {
        Self::new(self.coefficients, self.final_demand, satellite)
    }
}
