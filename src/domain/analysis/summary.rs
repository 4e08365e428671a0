//! Run summaries returned to callers.

use serde::Serialize;

use super::{AnalysisAxis, CategoryKind, TradeoffAnalysis};
use crate::domain::foundation::{RunId, Timestamp};

/// Category count of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub kind: CategoryKind,
    pub count: usize,
}

/// Condensed view of one completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub name: String,
    pub axis: AnalysisAxis,
    pub subject: String,
    pub rows: usize,
    pub categories: Vec<CategoryCount>,
}

impl From<&TradeoffAnalysis> for AnalysisSummary {
    fn from(analysis: &TradeoffAnalysis) -> Self {
        Self {
            name: analysis.name.clone(),
            axis: analysis.axis,
            subject: analysis.subject.clone(),
            rows: analysis.result.rows.len(),
            categories: analysis
                .result
                .categories
                .iter()
                .map(|t| CategoryCount {
                    category: t.category.label().to_string(),
                    kind: t.kind,
                    count: t.count,
                })
                .collect(),
        }
    }
}

/// Outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub scenario: String,
    pub started_at: Timestamp,
    pub completed_at: Timestamp,
    /// Indicators whose baseline total was zero in at least one perspective.
    pub zero_baseline_indicators: Vec<String>,
    pub analyses: Vec<AnalysisSummary>,
}

impl RunSummary {
    pub fn analysis(&self, name: &str) -> Option<&AnalysisSummary> {
        self.analyses.iter().find(|a| a.name == name)
    }
}
