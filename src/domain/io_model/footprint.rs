//! Footprints: intensities applied to the output a demand vector requires.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use super::{FinalDemandMatrix, ImpactTable, IntensityTable, LeontiefSolver};
use crate::domain::foundation::AnalysisError;

/// Which demand a footprint is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "perspective", rename_all = "snake_case")]
pub enum FootprintScope {
    /// `diag(m) · x` for the total output of the economy.
    Production,
    /// `diag(m) · L · y_r` for the final demand of the listed regions.
    Consumption { demand_regions: Vec<String> },
}

impl FootprintScope {
    pub fn label(&self) -> String {
        match self {
            FootprintScope::Production => "production".to_string(),
            FootprintScope::Consumption { demand_regions } => {
                format!("consumption of {}", demand_regions.join("+"))
            }
        }
    }
}

/// Computes footprints of every intensity indicator under `scope`.
///
/// Scenario footprints pass baseline intensities together with the
/// counterfactual solver and demand.
pub fn compute_footprint(
    scope: &FootprintScope,
    intensities: &IntensityTable,
    solver: &LeontiefSolver,
    final_demand: &FinalDemandMatrix,
) -> Result<ImpactTable, AnalysisError> {
    let output = match scope {
        FootprintScope::Production => solver.output_for(final_demand)?,
        FootprintScope::Consumption { demand_regions } => {
            let demand = final_demand.regional_demand(demand_regions)?;
            solver.total_output(&demand)?
        }
    };

    let columns = intensities
        .indicators()
        .iter()
        .map(|indicator| {
            let m = intensities.row(indicator)?;
            Ok((indicator.clone(), m.component_mul(&output)))
        })
        .collect::<Result<Vec<(String, DVector<f64>)>, AnalysisError>>()?;

    tracing::debug!(
        scope = %scope.label(),
        indicators = columns.len(),
        total_output = output.sum(),
        "Computed footprint"
    );

    Ok(ImpactTable::from_columns(intensities.entities().clone(), columns)?)
}
