//! Scenario Perturbation Engine - builds counterfactual matrices.
//!
//! Every operation returns new matrices; the baseline is only read.

use super::{MatrixSlice, MatrixTarget, Scenario, ScenarioDelta, Selector};
use crate::domain::foundation::AnalysisError;
use crate::domain::io_model::{CoefficientMatrix, FinalDemandMatrix, LabeledMatrix, MrioModel};

/// Counterfactual `A` and `Y` produced by a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Counterfactual {
    pub coefficients: CoefficientMatrix,
    pub final_demand: FinalDemandMatrix,
}

/// Stateless engine for applying scenario deltas.
pub struct PerturbationEngine;

impl PerturbationEngine {
    /// Multiplies every cell in the `rows × columns` slice by `1 + rate`.
    pub fn apply_rate_change(
        matrix: &LabeledMatrix,
        rows: &Selector,
        columns: &Selector,
        rate: f64,
    ) -> Result<LabeledMatrix, AnalysisError> {
        let (rows, columns) = matrix.resolve_slice(rows, columns)?;
        let factor = 1.0 + rate;

        let mut values = matrix.values().clone();
        for &r in &rows {
            for &c in &columns {
                values[(r, c)] *= factor;
            }
        }

        Ok(matrix.with_values(values))
    }

    /// Adds `alpha × (reference[donor] - matrix[donor])` onto `matrix[receiver]`.
    ///
    /// Donor and receiver slices must have the same shape; cells are paired
    /// by position within each slice. `reference` must carry the same labels
    /// as `matrix` (normally it is the baseline of the same target).
    pub fn apply_substitution(
        matrix: &LabeledMatrix,
        reference: &LabeledMatrix,
        donor: &MatrixSlice,
        receiver: &MatrixSlice,
        alpha: f64,
    ) -> Result<LabeledMatrix, AnalysisError> {
        matrix.ensure_same_labels(reference)?;
        let (donor_rows, donor_cols) = matrix.resolve_slice(&donor.rows, &donor.columns)?;
        let (receiver_rows, receiver_cols) =
            matrix.resolve_slice(&receiver.rows, &receiver.columns)?;

        if donor_rows.len() != receiver_rows.len() || donor_cols.len() != receiver_cols.len() {
            return Err(AnalysisError::dimension_mismatch(
                format!("substitution on {}", matrix.name()),
                format!("{}x{}", donor_rows.len(), donor_cols.len()),
                format!("{}x{}", receiver_rows.len(), receiver_cols.len()),
            ));
        }

        let current = matrix.values();
        let baseline = reference.values();
        let mut values = current.clone();
        let mut transferred = 0.0;

        for (&dr, &rr) in donor_rows.iter().zip(&receiver_rows) {
            for (&dc, &rc) in donor_cols.iter().zip(&receiver_cols) {
                let removed = baseline[(dr, dc)] - current[(dr, dc)];
                values[(rr, rc)] += alpha * removed;
                transferred += alpha * removed;
            }
        }

        tracing::debug!(matrix = matrix.name(), alpha, transferred, "Applied substitution");

        Ok(matrix.with_values(values))
    }

    /// Applies every delta of `scenario` in declared order.
    ///
    /// Each delta sees the working copy left by the deltas before it;
    /// substitutions measure removed flow against the untouched baseline.
    pub fn apply_scenario(model: &MrioModel, scenario: &Scenario) -> Result<Counterfactual, AnalysisError> {
        scenario.validate()?;

        let baseline_a = model.coefficients().matrix();
        let baseline_y = model.final_demand().matrix();
        let mut a = baseline_a.clone();
        let mut y = baseline_y.clone();

        for delta in &scenario.deltas {
            let (working, reference) = match delta.target() {
                MatrixTarget::Coefficients => (&mut a, baseline_a),
                MatrixTarget::FinalDemand => (&mut y, baseline_y),
            };

            *working = match delta {
                ScenarioDelta::RateChange {
                    rows, columns, rate, ..
                } => Self::apply_rate_change(working, rows, columns, rate.effective())?,
                ScenarioDelta::Substitution {
                    donor,
                    receiver,
                    alpha,
                    ..
                } => Self::apply_substitution(working, reference, donor, receiver, *alpha)?,
            };

            tracing::debug!(
                scenario = %scenario.name,
                delta = delta.name(),
                target = delta.target().label(),
                "Applied scenario delta"
            );
        }

        Ok(Counterfactual {
            coefficients: CoefficientMatrix::from_perturbed(a)?,
            final_demand: FinalDemandMatrix::new(y),
        })
    }
}
