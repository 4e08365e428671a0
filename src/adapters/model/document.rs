//! Serialized form of an MRIO model.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AxisIndex, ValidationError};
use crate::domain::io_model::{
    CoefficientMatrix, FinalDemandMatrix, LabeledMatrix, MrioModel, SatelliteAccount,
};

/// Final-demand block: consuming columns and row-major values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandDocument {
    pub columns: AxisIndex,
    pub values: Vec<Vec<f64>>,
}

/// Satellite block: indicator names and row-major values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteDocument {
    pub indicators: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Model document; every matrix is indexed by `entities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub entities: AxisIndex,
    pub coefficients: Vec<Vec<f64>>,
    pub final_demand: DemandDocument,
    pub satellite: SatelliteDocument,
}

impl ModelDocument {
    /// Builds the domain model, checking every invariant.
    pub fn into_model(self) -> Result<MrioModel, ValidationError> {
        let coefficients = CoefficientMatrix::new(LabeledMatrix::from_rows(
            "coefficients",
            self.entities.clone(),
            self.entities.clone(),
            self.coefficients,
        )?)?;
        let final_demand = FinalDemandMatrix::new(LabeledMatrix::from_rows(
            "final_demand",
            self.entities.clone(),
            self.final_demand.columns,
            self.final_demand.values,
        )?);
        let satellite =
            SatelliteAccount::from_rows(self.satellite.indicators, self.entities, self.satellite.values)?;
        MrioModel::new(coefficients, final_demand, satellite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "entities": [
            {"region": "EU", "item": "Agriculture"},
            {"region": "LAC", "item": "Agriculture"}
        ],
        "coefficients": [[0.1, 0.0], [0.05, 0.2]],
        "final_demand": {
            "columns": [{"region": "EU", "item": "Households"}],
            "values": [[10.0], [4.0]]
        },
        "satellite": {
            "indicators": ["GHG"],
            "values": [[3.0, 2.0]]
        }
    }"#;

    #[test]
    fn document_builds_model() {
        let doc: ModelDocument = serde_json::from_str(DOCUMENT).unwrap();
        let model = doc.into_model().unwrap();
        assert_eq!(model.entities().len(), 2);
        assert_eq!(model.satellite().indicators(), ["GHG".to_string()]);
    }

    #[test]
    fn negative_coefficients_are_rejected() {
        let mut doc: ModelDocument = serde_json::from_str(DOCUMENT).unwrap();
        doc.coefficients[0][1] = -0.1;
        assert!(matches!(doc.into_model(), Err(ValidationError::NegativeValue { .. })));
    }

    #[test]
    fn ragged_satellite_is_rejected() {
        let mut doc: ModelDocument = serde_json::from_str(DOCUMENT).unwrap();
        doc.satellite.values[0].pop();
        assert!(matches!(doc.into_model(), Err(ValidationError::ShapeMismatch { .. })));
    }
}
