//! Tradeoff Analyzer - geographical, impact and sectoral trade-offs.
//!
//! Each axis pivots the harmonized table into one row per primary entity
//! and one column per compared label, then hands the rows to the
//! classifier.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::{ClassificationResult, TradeoffClassifier};
use crate::domain::foundation::{first_seen, AnalysisError, AxisIndex};
use crate::domain::io_model::ImpactTable;

/// The dimension along which outcomes are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisAxis {
    /// Two regions, one indicator.
    Geographical,
    /// One region, three indicators.
    Impact,
    /// Two items, one indicator.
    Sectoral,
}

impl AnalysisAxis {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisAxis::Geographical => "geographical",
            AnalysisAxis::Impact => "impact",
            AnalysisAxis::Sectoral => "sectoral",
        }
    }
}

impl fmt::Display for AnalysisAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A requested analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "axis", rename_all = "snake_case")]
pub enum AnalysisSpec {
    Geographical {
        name: String,
        regions: Vec<String>,
        indicator: String,
    },
    Impact {
        name: String,
        region: String,
        indicators: Vec<String>,
    },
    Sectoral {
        name: String,
        items: Vec<String>,
        indicator: String,
    },
}

impl AnalysisSpec {
    pub fn name(&self) -> &str {
        match self {
            AnalysisSpec::Geographical { name, .. }
            | AnalysisSpec::Impact { name, .. }
            | AnalysisSpec::Sectoral { name, .. } => name,
        }
    }

    pub fn axis(&self) -> AnalysisAxis {
        match self {
            AnalysisSpec::Geographical { .. } => AnalysisAxis::Geographical,
            AnalysisSpec::Impact { .. } => AnalysisAxis::Impact,
            AnalysisSpec::Sectoral { .. } => AnalysisAxis::Sectoral,
        }
    }

    /// Indicators the analysis reads.
    pub fn indicators(&self) -> Vec<&str> {
        match self {
            AnalysisSpec::Geographical { indicator, .. } | AnalysisSpec::Sectoral { indicator, .. } => {
                vec![indicator.as_str()]
            }
            AnalysisSpec::Impact { indicators, .. } => indicators.iter().map(String::as_str).collect(),
        }
    }
}

/// Sum of raw values for one column of the pivot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub group: String,
    pub value: f64,
}

/// Result of one analysis: classified pivot rows, category aggregates and
/// per-column totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeoffAnalysis {
    pub name: String,
    pub axis: AnalysisAxis,
    /// Fixed label of the analysis (the indicator, or the region for impact).
    pub subject: String,
    /// Pivot columns, in requested order.
    pub columns: Vec<String>,
    pub result: ClassificationResult,
    pub totals: Vec<GroupTotal>,
}

/// Stateless analyzer over harmonized tables.
pub struct TradeoffAnalyzer;

impl TradeoffAnalyzer {
    /// Runs the analysis described by `spec`.
    pub fn run(spec: &AnalysisSpec, table: &ImpactTable) -> Result<TradeoffAnalysis, AnalysisError> {
        let analysis = match spec {
            AnalysisSpec::Geographical {
                name,
                regions,
                indicator,
            } => Self::geographical(name, table, regions, indicator)?,
            AnalysisSpec::Impact {
                name,
                region,
                indicators,
            } => Self::impact(name, table, region, indicators)?,
            AnalysisSpec::Sectoral {
                name,
                items,
                indicator,
            } => Self::sectoral(name, table, items, indicator)?,
        };

        tracing::debug!(
            analysis = %analysis.name,
            axis = %analysis.axis,
            rows = analysis.result.rows.len(),
            categories = analysis.result.categories.len(),
            "Completed trade-off analysis"
        );

        Ok(analysis)
    }

    /// Compares two regions on one indicator; one row per item.
    ///
    /// # Errors
    ///
    /// - `InvalidArity` unless exactly two regions are given
    /// - `UnknownIndicator` / `SelectorMismatch` for absent labels
    /// - `IncompletePivot` if an item exists in one region but not the other
    pub fn geographical(
        name: &str,
        table: &ImpactTable,
        regions: &[String],
        indicator: &str,
    ) -> Result<TradeoffAnalysis, AnalysisError> {
        let columns: [String; 2] = fixed_arity(AnalysisAxis::Geographical, regions)?;
        let k = indicator_position(table, indicator)?;
        ensure_present(table.entities(), &columns, Label::Region)?;

        let wanted: HashSet<&str> = columns.iter().map(String::as_str).collect();
        let rows = first_seen(
            table
                .entities()
                .keys()
                .iter()
                .filter(|key| wanted.contains(key.region.as_str()))
                .map(|key| key.item.as_str()),
        );

        let pivot = pivot(&rows, &columns, |item, region| {
            table
                .entities()
                .position_of(region, item)
                .map(|n| table.values()[(n, k)])
        })?;

        Ok(TradeoffAnalysis {
            name: name.to_string(),
            axis: AnalysisAxis::Geographical,
            subject: indicator.to_string(),
            totals: column_totals(&columns, &pivot),
            result: TradeoffClassifier::classify_pairs(&pivot)?,
            columns: columns.to_vec(),
        })
    }

    /// Compares three indicators within one region; one row per item.
    pub fn impact(
        name: &str,
        table: &ImpactTable,
        region: &str,
        indicators: &[String],
    ) -> Result<TradeoffAnalysis, AnalysisError> {
        let columns: [String; 3] = fixed_arity(AnalysisAxis::Impact, indicators)?;
        let positions = columns
            .iter()
            .map(|i| indicator_position(table, i))
            .collect::<Result<Vec<_>, _>>()?;
        ensure_present(table.entities(), &[region.to_string()], Label::Region)?;

        let rows = first_seen(
            table
                .entities()
                .keys()
                .iter()
                .filter(|key| key.region == region)
                .map(|key| key.item.as_str()),
        );

        let pivot = pivot(&rows, &columns, |item, indicator| {
            let n = table.entities().position_of(region, item)?;
            let c = columns.iter().position(|i| i == indicator)?;
            Some(table.values()[(n, positions[c])])
        })?;

        Ok(TradeoffAnalysis {
            name: name.to_string(),
            axis: AnalysisAxis::Impact,
            subject: region.to_string(),
            totals: column_totals(&columns, &pivot),
            result: TradeoffClassifier::classify_triples(&pivot)?,
            columns: columns.to_vec(),
        })
    }

    /// Compares two items on one indicator; one row per region.
    pub fn sectoral(
        name: &str,
        table: &ImpactTable,
        items: &[String],
        indicator: &str,
    ) -> Result<TradeoffAnalysis, AnalysisError> {
        let columns: [String; 2] = fixed_arity(AnalysisAxis::Sectoral, items)?;
        let k = indicator_position(table, indicator)?;
        ensure_present(table.entities(), &columns, Label::Item)?;

        let wanted: HashSet<&str> = columns.iter().map(String::as_str).collect();
        let rows = first_seen(
            table
                .entities()
                .keys()
                .iter()
                .filter(|key| wanted.contains(key.item.as_str()))
                .map(|key| key.region.as_str()),
        );

        let pivot = pivot(&rows, &columns, |region, item| {
            table
                .entities()
                .position_of(region, item)
                .map(|n| table.values()[(n, k)])
        })?;

        Ok(TradeoffAnalysis {
            name: name.to_string(),
            axis: AnalysisAxis::Sectoral,
            subject: indicator.to_string(),
            totals: column_totals(&columns, &pivot),
            result: TradeoffClassifier::classify_pairs(&pivot)?,
            columns: columns.to_vec(),
        })
    }
}

#[derive(Clone, Copy)]
enum Label {
    Region,
    Item,
}

fn fixed_arity<const N: usize>(axis: AnalysisAxis, labels: &[String]) -> Result<[String; N], AnalysisError> {
    labels.to_vec().try_into().map_err(|labels: Vec<String>| AnalysisError::InvalidArity {
        analysis: axis.label().to_string(),
        expected: N,
        actual: labels.len(),
    })
}

fn indicator_position(table: &ImpactTable, indicator: &str) -> Result<usize, AnalysisError> {
    table
        .indicator_position(indicator)
        .ok_or_else(|| AnalysisError::unknown_indicator(indicator))
}

fn ensure_present(entities: &AxisIndex, labels: &[String], kind: Label) -> Result<(), AnalysisError> {
    let missing: Vec<String> = labels
        .iter()
        .filter(|label| match kind {
            Label::Region => !entities.contains_region(label),
            Label::Item => !entities.contains_item(label),
        })
        .cloned()
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(AnalysisError::SelectorMismatch {
        matrix: "harmonized table".to_string(),
        axis: match kind {
            Label::Region => "regions",
            Label::Item => "items",
        }
        .to_string(),
        missing,
    })
}

fn pivot<const N: usize>(
    rows: &[&str],
    columns: &[String; N],
    cell: impl Fn(&str, &str) -> Option<f64>,
) -> Result<Vec<(String, [f64; N])>, AnalysisError> {
    rows.iter()
        .map(|row| {
            let mut values = [0.0; N];
            for (slot, column) in values.iter_mut().zip(columns) {
                *slot = cell(row, column).ok_or_else(|| AnalysisError::IncompletePivot {
                    row: row.to_string(),
                    column: column.clone(),
                })?;
            }
            Ok((row.to_string(), values))
        })
        .collect()
}

fn column_totals<const N: usize>(columns: &[String; N], pivot: &[(String, [f64; N])]) -> Vec<GroupTotal> {
    columns
        .iter()
        .enumerate()
        .map(|(c, group)| GroupTotal {
            group: group.clone(),
            value: pivot.iter().map(|(_, values)| values[c]).sum(),
        })
        .collect()
}
