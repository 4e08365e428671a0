//! Harmonizer - percentage change against the baseline total.

use crate::domain::foundation::AnalysisError;
use crate::domain::io_model::ImpactTable;

/// Harmonized deltas plus the indicators whose baseline summed to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDelta {
    pub table: ImpactTable,
    pub zero_baseline_indicators: Vec<String>,
}

/// Converts footprint pairs into comparable percentage changes.
///
/// `delta = (scenario - baseline) / sum(baseline) * 100` per indicator, with
/// one scalar denominator per indicator. Indicators listed in `sign_flip`
/// are negated afterwards so that a positive value always reads as an
/// improvement. Repeated sign-flip entries count once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Harmonizer {
    sign_flip: Vec<String>,
}

impl Harmonizer {
    pub fn new<I, S>(sign_flip: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for indicator in sign_flip.into_iter().map(Into::into) {
            if !unique.contains(&indicator) {
                unique.push(indicator);
            }
        }
        Self { sign_flip: unique }
    }

    pub fn sign_flip(&self) -> &[String] {
        &self.sign_flip
    }

    /// Harmonizes `scenario` against `baseline`.
    ///
    /// An indicator whose baseline sums to exactly zero yields zero for
    /// every entity and is listed in `zero_baseline_indicators`.
    pub fn harmonize(
        &self,
        baseline: &ImpactTable,
        scenario: &ImpactTable,
    ) -> Result<NormalizedDelta, AnalysisError> {
        if baseline.entities() != scenario.entities() || baseline.indicators() != scenario.indicators() {
            return Err(AnalysisError::dimension_mismatch(
                "baseline and scenario footprints",
                format!("{}x{}", baseline.entities().len(), baseline.indicators().len()),
                format!("{}x{}", scenario.entities().len(), scenario.indicators().len()),
            ));
        }

        let totals = baseline.column_sums();
        let mut values = scenario.values() - baseline.values();
        let mut zero_baseline_indicators = Vec::new();

        for (k, indicator) in baseline.indicators().iter().enumerate() {
            let total = totals[k];
            let mut column = values.column_mut(k);
            if total == 0.0 {
                tracing::warn!(
                    indicator = %indicator,
                    "Baseline total is zero; harmonized delta set to 0"
                );
                column.fill(0.0);
                zero_baseline_indicators.push(indicator.clone());
                continue;
            }
            column.apply(|v| {
                let pct = *v / total * 100.0;
                *v = if pct.is_nan() { 0.0 } else { pct };
            });
        }

        let table = flip_signs(&baseline.with_values(values), &self.sign_flip)?;

        tracing::debug!(
            entities = table.entities().len(),
            indicators = table.indicators().len(),
            flipped = self.sign_flip.len(),
            "Harmonized footprint deltas"
        );

        Ok(NormalizedDelta {
            table,
            zero_baseline_indicators,
        })
    }
}

/// Negates the listed indicator columns. Zeros stay `+0.0`.
pub fn flip_signs(table: &ImpactTable, indicators: &[String]) -> Result<ImpactTable, AnalysisError> {
    let mut values = table.values().clone();
    for indicator in indicators {
        let k = table
            .indicator_position(indicator)
            .ok_or_else(|| AnalysisError::unknown_indicator(indicator.clone()))?;
        values.column_mut(k).apply(|v| *v = -*v + 0.0);
    }
    Ok(table.with_values(values))
}
