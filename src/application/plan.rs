//! Analysis plan - dataset-specific run configuration.
//!
//! Everything that names regions, items or indicators lives here and is
//! loaded from a YAML file at run time.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::domain::analysis::AnalysisSpec;
use crate::domain::foundation::ValidationError;
use crate::domain::harmonization::Aggregation;
use crate::domain::io_model::{CharacterizationFactors, FootprintScope};
use crate::domain::scenario::Scenario;

/// Folds emission stressors into one indicator before the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterizationPlan {
    /// Name of the produced indicator.
    pub indicator: String,
    /// Stressor weights; the IPCC AR6 GWP100 table when omitted.
    #[serde(default)]
    pub factors: Option<BTreeMap<String, f64>>,
}

impl CharacterizationPlan {
    pub fn factors(&self) -> CharacterizationFactors {
        match &self.factors {
            Some(factors) => CharacterizationFactors {
                indicator: self.indicator.clone(),
                factors: factors.clone(),
            },
            None => CharacterizationFactors::ipcc_ar6_gwp100(self.indicator.clone()),
        }
    }
}

/// One footprint perspective and how its deltas are relabeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perspective {
    #[serde(flatten)]
    pub scope: FootprintScope,
    #[serde(default)]
    pub aggregation: Aggregation,
}

fn default_report_prefix() -> String {
    "ts_results".to_string()
}

/// Full description of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPlan {
    pub scenario: Scenario,
    /// Satellite indicators carried through the run, in column order.
    pub indicators: Vec<String>,
    /// Indicators where lower is better (emissions).
    #[serde(default)]
    pub sign_flip: Vec<String>,
    #[serde(default)]
    pub characterization: Option<CharacterizationPlan>,
    pub perspectives: Vec<Perspective>,
    pub analyses: Vec<AnalysisSpec>,
    #[serde(default = "default_report_prefix")]
    pub report_prefix: String,
}

impl AnalysisPlan {
    /// Checks the plan for internal consistency before any data is read.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scenario.validate()?;

        if self.indicators.is_empty() {
            return Err(ValidationError::empty_field("indicators"));
        }
        let mut known = HashSet::new();
        for indicator in &self.indicators {
            if !known.insert(indicator.as_str()) {
                return Err(ValidationError::duplicate_label("indicators", indicator.clone()));
            }
        }

        if let Some(unknown) = self.sign_flip.iter().find(|i| !known.contains(i.as_str())) {
            return Err(ValidationError::invalid_format(
                "sign_flip",
                format!("'{}' is not a listed indicator", unknown),
            ));
        }
        let mut flipped = HashSet::new();
        for indicator in &self.sign_flip {
            if !flipped.insert(indicator.as_str()) {
                return Err(ValidationError::duplicate_label("sign_flip", indicator.clone()));
            }
        }

        if self.perspectives.is_empty() {
            return Err(ValidationError::empty_field("perspectives"));
        }
        if self.analyses.is_empty() {
            return Err(ValidationError::empty_field("analyses"));
        }

        let mut names = HashSet::new();
        for analysis in &self.analyses {
            if analysis.name().trim().is_empty() {
                return Err(ValidationError::empty_field("analysis name"));
            }
            if !names.insert(analysis.name()) {
                return Err(ValidationError::duplicate_label("analyses", analysis.name()));
            }
            if let Some(unknown) = analysis.indicators().into_iter().find(|i| !known.contains(i)) {
                return Err(ValidationError::invalid_format(
                    analysis.name(),
                    format!("'{}' is not a listed indicator", unknown),
                ));
            }
        }

        if self.report_prefix.trim().is_empty() {
            return Err(ValidationError::empty_field("report_prefix"));
        }

        Ok(())
    }
}
