//! Satellite accounts and emission characterization.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::domain::foundation::{AnalysisError, AxisIndex, ValidationError};

/// Indicator rows (value added, employment, emission species, ...) by entity.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteAccount {
    indicators: Vec<String>,
    entities: AxisIndex,
    values: DMatrix<f64>,
}

impl SatelliteAccount {
    /// Creates an account; `values` is indicators × entities.
    pub fn new(
        indicators: Vec<String>,
        entities: AxisIndex,
        values: DMatrix<f64>,
    ) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for name in &indicators {
            if name.trim().is_empty() {
                return Err(ValidationError::empty_field("indicator"));
            }
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::duplicate_label("indicator", name.clone()));
            }
        }
        if values.shape() != (indicators.len(), entities.len()) {
            return Err(ValidationError::shape_mismatch(
                "satellite",
                (indicators.len(), entities.len()),
                values.shape(),
            ));
        }
        Ok(Self {
            indicators,
            entities,
            values,
        })
    }

    /// Creates an account from row-major nested vectors.
    pub fn from_rows(
        indicators: Vec<String>,
        entities: AxisIndex,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, ValidationError> {
        let ncols = entities.len();
        if rows.len() != indicators.len() || rows.iter().any(|r| r.len() != ncols) {
            return Err(ValidationError::shape_mismatch(
                "satellite",
                (indicators.len(), ncols),
                (rows.len(), rows.first().map(Vec::len).unwrap_or(0)),
            ));
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let values = DMatrix::from_row_slice(indicators.len(), ncols, &flat);
        Self::new(indicators, entities, values)
    }

    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    pub fn entities(&self) -> &AxisIndex {
        &self.entities
    }

    pub fn contains(&self, indicator: &str) -> bool {
        self.indicators.iter().any(|i| i == indicator)
    }

    /// The row of one indicator.
    pub fn row(&self, indicator: &str) -> Result<DVector<f64>, AnalysisError> {
        let position = self
            .indicators
            .iter()
            .position(|i| i == indicator)
            .ok_or_else(|| AnalysisError::unknown_indicator(indicator))?;
        Ok(self.values.row(position).transpose())
    }

    /// Returns a copy with one more indicator row appended.
    pub fn with_indicator(
        &self,
        indicator: impl Into<String>,
        row: &DVector<f64>,
    ) -> Result<Self, ValidationError> {
        let indicator = indicator.into();
        if row.len() != self.entities.len() {
            return Err(ValidationError::shape_mismatch(
                indicator,
                (1, self.entities.len()),
                (1, row.len()),
            ));
        }
        let mut indicators = self.indicators.clone();
        indicators.push(indicator);
        let position = self.indicators.len();
        let mut values = self.values.clone().insert_row(position, 0.0);
        values.set_row(position, &row.transpose());
        Self::new(indicators, self.entities.clone(), values)
    }
}

/// Weighting factors that fold emission stressors into one indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterizationFactors {
    /// Name of the produced indicator row.
    pub indicator: String,
    /// Stressor name -> weight (e.g. kg CO2-eq per kg).
    pub factors: BTreeMap<String, f64>,
}

impl CharacterizationFactors {
    /// IPCC AR6 100-year global warming potentials for the EXIOBASE air
    /// emission stressors. HFC and PFC rows are already in CO2-eq.
    pub fn ipcc_ar6_gwp100(indicator: impl Into<String>) -> Self {
        let factors = [
            ("CO2 - combustion - air", 1.0),
            ("CO2 - agriculture - peat decay - air", 1.0),
            ("CH4 - combustion - air", 27.0),
            ("CH4 - agriculture - air", 27.0),
            ("N2O - combustion - air", 273.0),
            ("N2O - agriculture - air", 273.0),
            ("SF6 - air", 25200.0),
            ("HFC - air", 1.0),
            ("PFC - air", 1.0),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();

        Self {
            indicator: indicator.into(),
            factors,
        }
    }

    /// Appends the weighted sum of the stressors present in `account`.
    ///
    /// Stressors the account does not carry are skipped; if none of them
    /// is present the call fails, since the result would be all zeros.
    pub fn characterize(&self, account: &SatelliteAccount) -> Result<SatelliteAccount, AnalysisError> {
        let mut total = DVector::zeros(account.entities().len());
        let mut matched = 0usize;

        for (stressor, weight) in &self.factors {
            if !account.contains(stressor) {
                continue;
            }
            total += account.row(stressor)? * *weight;
            matched += 1;
        }

        if matched == 0 {
            return Err(AnalysisError::unknown_indicator(format!(
                "none of the {} stressors for '{}'",
                self.factors.len(),
                self.indicator
            )));
        }

        tracing::debug!(
            indicator = %self.indicator,
            matched,
            skipped = self.factors.len() - matched,
            "Characterized emission stressors"
        );

        Ok(account.with_indicator(self.indicator.clone(), &total)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities() -> AxisIndex {
        AxisIndex::product(&["EU"], &["Agri", "Steel"]).unwrap()
    }

    fn account() -> SatelliteAccount {
        SatelliteAccount::from_rows(
            vec![
                "CO2 - combustion - air".to_string(),
                "CH4 - agriculture - air".to_string(),
                "Employment".to_string(),
            ],
            entities(),
            vec![vec![10.0, 20.0], vec![1.0, 0.0], vec![5.0, 6.0]],
        )
        .unwrap()
    }

    #[test]
    fn row_returns_indicator_values() {
        let row = account().row("Employment").unwrap();
        assert_eq!(row, DVector::from_vec(vec![5.0, 6.0]));
    }

    #[test]
    fn unknown_indicator_is_reported() {
        let err = account().row("Water").unwrap_err();
        assert_eq!(err, AnalysisError::unknown_indicator("Water"));
    }

    #[test]
    fn duplicate_indicators_are_rejected() {
        let result = SatelliteAccount::from_rows(
            vec!["GHG".to_string(), "GHG".to_string()],
            entities(),
            vec![vec![1.0, 1.0], vec![2.0, 2.0]],
        );
        assert!(matches!(result, Err(ValidationError::DuplicateLabel { .. })));
    }

    #[test]
    fn characterization_adds_weighted_sum_of_present_stressors() {
        let factors = CharacterizationFactors::ipcc_ar6_gwp100("GHG emissions");
        let result = factors.characterize(&account()).unwrap();

        assert_eq!(result.indicators().len(), 4);
        // 10 * 1 + 1 * 27 and 20 * 1 + 0 * 27
        assert_eq!(result.row("GHG emissions").unwrap(), DVector::from_vec(vec![37.0, 20.0]));
        // original rows are preserved
        assert_eq!(result.row("Employment").unwrap(), DVector::from_vec(vec![5.0, 6.0]));
    }

    #[test]
    fn characterization_without_matching_stressors_fails() {
        let only_jobs = SatelliteAccount::from_rows(
            vec!["Employment".to_string()],
            entities(),
            vec![vec![1.0, 2.0]],
        )
        .unwrap();
        let factors = CharacterizationFactors::ipcc_ar6_gwp100("GHG");
        assert!(matches!(
            factors.characterize(&only_jobs),
            Err(AnalysisError::UnknownIndicator { .. })
        ));
    }

    #[test]
    fn ar6_defaults_cover_major_gases() {
        let factors = CharacterizationFactors::ipcc_ar6_gwp100("GHG");
        assert_eq!(factors.factors.get("SF6 - air"), Some(&25200.0));
        assert_eq!(factors.factors.get("N2O - combustion - air"), Some(&273.0));
        assert_eq!(factors.factors.len(), 9);
    }
}
