//! Leontief Solver - total output and per-unit intensities.
//!
//! Total output is `x = L · y` with `L = (I - A)^-1`. Intensities divide each
//! satellite row by output; entities with zero output get zero intensity.

use nalgebra::{DMatrix, DVector};

use super::{CoefficientMatrix, FinalDemandMatrix, SatelliteAccount};
use crate::domain::foundation::{AnalysisError, AxisIndex, AxisKey};

/// Holds the Leontief inverse of one coefficient matrix.
///
/// Building the solver performs the O(n³) inversion once; every output and
/// footprint calculation against the same `A` reuses it.
#[derive(Debug, Clone)]
pub struct LeontiefSolver {
    label: String,
    entities: AxisIndex,
    inverse: DMatrix<f64>,
}

impl LeontiefSolver {
    /// Inverts `I - A`.
    ///
    /// # Errors
    ///
    /// `MatrixSingular` when `I - A` has no inverse or the inverse is not
    /// finite.
    pub fn new(coefficients: &CoefficientMatrix) -> Result<Self, AnalysisError> {
        let label = coefficients.matrix().name().to_string();
        let n = coefficients.len();

        let unity = coefficients.columns_at_or_above_unity();
        if unity > 0 {
            tracing::warn!(
                matrix = %label,
                columns = unity,
                "Coefficient columns sum to one or more; inverse may not be meaningful"
            );
        }

        let system = DMatrix::<f64>::identity(n, n) - coefficients.values();
        let inverse = system
            .try_inverse()
            .ok_or_else(|| AnalysisError::singular(label.clone()))?;

        if inverse.iter().any(|v| !v.is_finite()) {
            return Err(AnalysisError::singular(label));
        }

        tracing::debug!(matrix = %label, entities = n, "Computed Leontief inverse");

        Ok(Self {
            label,
            entities: coefficients.entities().clone(),
            inverse,
        })
    }

    /// Name of the coefficient matrix this solver was built from.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entities(&self) -> &AxisIndex {
        &self.entities
    }

    /// The Leontief inverse `L`.
    pub fn inverse(&self) -> &DMatrix<f64> {
        &self.inverse
    }

    /// Output required along the full supply chain to deliver `demand`.
    pub fn total_output(&self, demand: &DVector<f64>) -> Result<DVector<f64>, AnalysisError> {
        if demand.len() != self.entities.len() {
            return Err(AnalysisError::dimension_mismatch(
                format!("final demand for {}", self.label),
                self.entities.len(),
                demand.len(),
            ));
        }
        Ok(&self.inverse * demand)
    }

    /// Total output for the whole of `Y`.
    pub fn output_for(&self, final_demand: &FinalDemandMatrix) -> Result<DVector<f64>, AnalysisError> {
        self.ensure_entities(final_demand.entities(), "final demand")?;
        self.total_output(&final_demand.total_demand())
    }

    /// Intensities of `indicators` given the output implied by `final_demand`.
    pub fn solve_intensities(
        &self,
        satellite: &SatelliteAccount,
        final_demand: &FinalDemandMatrix,
        indicators: &[String],
    ) -> Result<IntensityTable, AnalysisError> {
        self.ensure_entities(satellite.entities(), "satellite")?;
        let output = self.output_for(final_demand)?;
        IntensityTable::from_output(satellite, &output, indicators)
    }

    fn ensure_entities(&self, other: &AxisIndex, what: &str) -> Result<(), AnalysisError> {
        if other != &self.entities {
            return Err(AnalysisError::dimension_mismatch(
                format!("{} entities for {}", what, self.label),
                self.entities.len(),
                other.len(),
            ));
        }
        Ok(())
    }
}

/// `1 / x` elementwise, with zero output mapped to zero.
pub fn inverse_diagonal(output: &DVector<f64>) -> DVector<f64> {
    output.map(|x| if x == 0.0 { 0.0 } else { 1.0 / x })
}

/// Impact per unit of output; one row per indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityTable {
    indicators: Vec<String>,
    entities: AxisIndex,
    values: DMatrix<f64>,
}

impl IntensityTable {
    /// Divides the selected satellite rows by `output`.
    pub fn from_output(
        satellite: &SatelliteAccount,
        output: &DVector<f64>,
        indicators: &[String],
    ) -> Result<Self, AnalysisError> {
        let entities = satellite.entities();
        if output.len() != entities.len() {
            return Err(AnalysisError::dimension_mismatch(
                "total output",
                entities.len(),
                output.len(),
            ));
        }

        let scale = inverse_diagonal(output);
        let zero_output = output.iter().filter(|x| **x == 0.0).count();
        if zero_output > 0 {
            tracing::debug!(entities = zero_output, "Zero-output entities receive zero intensity");
        }

        let mut values = DMatrix::zeros(indicators.len(), entities.len());
        for (k, indicator) in indicators.iter().enumerate() {
            let row = satellite.row(indicator)?.component_mul(&scale);
            values.set_row(k, &row.transpose());
        }

        Ok(Self {
            indicators: indicators.to_vec(),
            entities: entities.clone(),
            values,
        })
    }

    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    pub fn entities(&self) -> &AxisIndex {
        &self.entities
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Intensity vector of one indicator.
    pub fn row(&self, indicator: &str) -> Result<DVector<f64>, AnalysisError> {
        let k = self
            .indicators
            .iter()
            .position(|i| i == indicator)
            .ok_or_else(|| AnalysisError::unknown_indicator(indicator))?;
        Ok(self.values.row(k).transpose())
    }

    pub fn get(&self, indicator: &str, entity: &AxisKey) -> Option<f64> {
        let k = self.indicators.iter().position(|i| i == indicator)?;
        let n = self.entities.position(entity)?;
        Some(self.values[(k, n)])
    }
}
