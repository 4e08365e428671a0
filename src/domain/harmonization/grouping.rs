//! Region aggregation of harmonized tables.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnalysisError, ValidationError};
use crate::domain::io_model::ImpactTable;

/// A named bloc of regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionGroup {
    pub label: String,
    pub members: Vec<String>,
}

impl RegionGroup {
    pub fn new<I, S>(label: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

/// How a harmonized table is relabeled before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Aggregation {
    /// Keep individual `(region, item)` entities.
    #[default]
    Keep,
    /// Sum each group's regions per item. Groups may overlap.
    Groups { groups: Vec<RegionGroup> },
    /// Sum every region per item under one label.
    Collapse { label: String },
}

impl Aggregation {
    pub fn apply(&self, table: &ImpactTable) -> Result<ImpactTable, AnalysisError> {
        match self {
            Aggregation::Keep => Ok(table.clone()),
            Aggregation::Groups { groups } => {
                if groups.is_empty() {
                    return Err(ValidationError::empty_field("groups").into());
                }
                let grouped = groups
                    .iter()
                    .map(|g| table.regroup(&g.label, &g.members))
                    .collect::<Result<Vec<_>, _>>()?;
                ImpactTable::concat(&grouped)
            }
            Aggregation::Collapse { label } => table.collapse(label),
        }
    }
}
