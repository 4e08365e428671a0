//! Scenario definitions: named structural changes to the model.

use serde::{Deserialize, Serialize};

use super::Selector;
use crate::domain::foundation::ValidationError;

/// The matrix an intervention changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixTarget {
    #[default]
    Coefficients,
    FinalDemand,
}

impl MatrixTarget {
    pub fn label(&self) -> &'static str {
        match self {
            MatrixTarget::Coefficients => "coefficients",
            MatrixTarget::FinalDemand => "final_demand",
        }
    }
}

/// Relative change applied as `value * (1 + rate)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rate {
    Value(f64),
    /// Technical change `kt` reached by a share `kp` of the market.
    Parameterized {
        technical_change: f64,
        #[serde(default = "full_penetration")]
        market_penetration: f64,
    },
}

fn full_penetration() -> f64 {
    1.0
}

impl Rate {
    pub fn effective(&self) -> f64 {
        match self {
            Rate::Value(rate) => *rate,
            Rate::Parameterized {
                technical_change,
                market_penetration,
            } => technical_change * market_penetration,
        }
    }
}

/// A rectangular slice addressed by row and column selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixSlice {
    #[serde(default)]
    pub rows: Selector,
    #[serde(default)]
    pub columns: Selector,
}

impl MatrixSlice {
    pub fn new(rows: Selector, columns: Selector) -> Self {
        Self { rows, columns }
    }
}

/// One named structural change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioDelta {
    /// Multiplies every cell of a slice by `1 + rate`.
    RateChange {
        name: String,
        #[serde(default)]
        target: MatrixTarget,
        #[serde(default)]
        rows: Selector,
        #[serde(default)]
        columns: Selector,
        rate: Rate,
    },
    /// Moves `alpha` times the flow removed from `donor` (relative to the
    /// baseline) onto `receiver`.
    Substitution {
        name: String,
        #[serde(default)]
        target: MatrixTarget,
        donor: MatrixSlice,
        receiver: MatrixSlice,
        alpha: f64,
    },
}

impl ScenarioDelta {
    pub fn name(&self) -> &str {
        match self {
            ScenarioDelta::RateChange { name, .. } | ScenarioDelta::Substitution { name, .. } => name,
        }
    }

    pub fn target(&self) -> MatrixTarget {
        match self {
            ScenarioDelta::RateChange { target, .. } | ScenarioDelta::Substitution { target, .. } => {
                *target
            }
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name().trim().is_empty() {
            return Err(ValidationError::empty_field("delta name"));
        }
        match self {
            ScenarioDelta::RateChange { name, rate, .. } => {
                if !rate.effective().is_finite() {
                    return Err(ValidationError::invalid_format(name.clone(), "rate must be finite"));
                }
                if rate.effective() < -1.0 {
                    tracing::warn!(
                        delta = %name,
                        rate = rate.effective(),
                        "Rate below -1 flips the sign of the selected cells"
                    );
                }
            }
            ScenarioDelta::Substitution { name, alpha, .. } => {
                if !alpha.is_finite() {
                    return Err(ValidationError::invalid_format(name.clone(), "alpha must be finite"));
                }
            }
        }
        Ok(())
    }
}

/// An ordered list of interventions. Deltas apply in declared order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub deltas: Vec<ScenarioDelta>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, deltas: Vec<ScenarioDelta>) -> Self {
        Self {
            name: name.into(),
            description: None,
            deltas,
        }
    }

    /// Checks names and parameters before any matrix is touched.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("scenario name"));
        }
        self.deltas.iter().try_for_each(ScenarioDelta::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterized_rate_multiplies_kt_and_kp() {
        let rate = Rate::Parameterized {
            technical_change: -0.5,
            market_penetration: 0.4,
        };
        assert!((rate.effective() - (-0.2)).abs() < 1e-12);
        assert_eq!(Rate::Value(0.3).effective(), 0.3);
    }

    #[test]
    fn rate_change_deserializes_with_defaults() {
        let yaml = r#"
kind: rate_change
name: Compost uptake
rows:
  regions: [LAC]
  items: [Compost]
rate: 0.3
"#;
        let delta: ScenarioDelta = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(delta.name(), "Compost uptake");
        assert_eq!(delta.target(), MatrixTarget::Coefficients);
        match delta {
            ScenarioDelta::RateChange { columns, rate, .. } => {
                assert_eq!(columns, Selector::all());
                assert_eq!(rate, Rate::Value(0.3));
            }
            other => panic!("unexpected delta {:?}", other),
        }
    }

    #[test]
    fn parameterized_rate_deserializes_without_penetration() {
        let yaml = r#"
kind: rate_change
name: Fertiliser cut
target: final_demand
rate:
  technical_change: -0.016
"#;
        let delta: ScenarioDelta = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(delta.target(), MatrixTarget::FinalDemand);
        match delta {
            ScenarioDelta::RateChange { rate, .. } => assert_eq!(rate.effective(), -0.016),
            other => panic!("unexpected delta {:?}", other),
        }
    }

    #[test]
    fn substitution_deserializes() {
        let yaml = r#"
kind: substitution
name: Organic shift
donor:
  rows: { items: [Fertilisers] }
  columns: { items: [Agriculture] }
receiver:
  rows: { items: [Compost] }
  columns: { items: [Agriculture] }
alpha: 2
"#;
        let delta: ScenarioDelta = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(delta, ScenarioDelta::Substitution { alpha, .. } if alpha == 2.0));
    }

    #[test]
    fn validate_rejects_blank_names_and_non_finite_values() {
        let blank = Scenario::new(" ", vec![]);
        assert_eq!(blank.validate(), Err(ValidationError::empty_field("scenario name")));

        let bad_rate = Scenario::new(
            "CE",
            vec![ScenarioDelta::RateChange {
                name: "r".to_string(),
                target: MatrixTarget::Coefficients,
                rows: Selector::all(),
                columns: Selector::all(),
                rate: Rate::Value(f64::NAN),
            }],
        );
        assert!(matches!(bad_rate.validate(), Err(ValidationError::InvalidFormat { .. })));
    }
}
