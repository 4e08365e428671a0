//! Tabular reports built from trade-off analyses.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{RunSummary, TradeoffAnalysis};
use crate::domain::foundation::{RunId, Timestamp};

/// A typed table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Count(u64),
    Number(f64),
    Text(String),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Count(value as u64)
    }
}

/// Named columns and rows of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Per-entity detail: raw pivot values, category, kind and magnitude.
    pub fn detail(analysis: &TradeoffAnalysis) -> Self {
        let mut columns = vec!["entity".to_string()];
        columns.extend(analysis.columns.iter().cloned());
        columns.extend(["category", "kind", "magnitude"].map(String::from));

        let mut table = Self::new(format!("{}_detail", analysis.name), columns);
        for row in &analysis.result.rows {
            let mut cells = vec![Cell::from(row.entity.as_str())];
            cells.extend(row.values.iter().map(|v| Cell::from(*v)));
            cells.push(Cell::from(row.category.label()));
            cells.push(Cell::from(row.kind.label()));
            cells.push(Cell::from(row.magnitude));
            table.push(cells);
        }
        table
    }

    /// Category aggregate: count and summed magnitude.
    pub fn categories(analysis: &TradeoffAnalysis) -> Self {
        let columns = ["category", "kind", "count", "magnitude"].map(String::from).to_vec();
        let mut table = Self::new(format!("{}_categories", analysis.name), columns);
        for tally in &analysis.result.categories {
            table.push(vec![
                Cell::from(tally.category.label()),
                Cell::from(tally.kind.label()),
                Cell::from(tally.count),
                Cell::from(tally.magnitude),
            ]);
        }
        table
    }

    /// Raw value totals per pivot column.
    pub fn totals(analysis: &TradeoffAnalysis) -> Self {
        let columns = vec!["group".to_string(), analysis.subject.clone()];
        let mut table = Self::new(format!("{}_totals", analysis.name), columns);
        for total in &analysis.totals {
            table.push(vec![Cell::from(total.group.as_str()), Cell::from(total.value)]);
        }
        table
    }

    /// The three tables of one analysis.
    pub fn for_analysis(analysis: &TradeoffAnalysis) -> [Self; 3] {
        [
            Self::detail(analysis),
            Self::categories(analysis),
            Self::totals(analysis),
        ]
    }
}

/// Everything persisted for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub prefix: String,
    pub summary: RunSummary,
    pub tables: Vec<ReportTable>,
}

impl RunReport {
    pub fn new(prefix: impl Into<String>, summary: RunSummary, analyses: &[TradeoffAnalysis]) -> Self {
        Self {
            prefix: prefix.into(),
            summary,
            tables: analyses.iter().flat_map(ReportTable::for_analysis).collect(),
        }
    }

    pub fn run_id(&self) -> RunId {
        self.summary.run_id
    }

    pub fn generated_at(&self) -> Timestamp {
        self.summary.completed_at
    }

    /// `<prefix>_<YYYYMMDD>_<short run id>.json`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.json",
            self.prefix,
            self.generated_at().date_stamp(),
            self.run_id().short()
        )
    }

    pub fn table(&self, name: &str) -> Option<&ReportTable> {
        self.tables.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{AnalysisAxis, AnalysisSummary, GroupTotal, TradeoffClassifier};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn analysis() -> TradeoffAnalysis {
        TradeoffAnalysis {
            name: "geo_ghg".to_string(),
            axis: AnalysisAxis::Geographical,
            subject: "GHG".to_string(),
            columns: vec!["EU".to_string(), "LAC".to_string()],
            result: TradeoffClassifier::classify_pairs(&[
                ("Agriculture".to_string(), [3.0, 4.0]),
                ("Compost".to_string(), [0.0, -1.0]),
            ])
            .unwrap(),
            totals: vec![
                GroupTotal { group: "EU".to_string(), value: 3.0 },
                GroupTotal { group: "LAC".to_string(), value: 3.0 },
            ],
        }
    }

    fn summary() -> RunSummary {
        let at = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap());
        RunSummary {
            run_id: RunId::from_uuid(Uuid::parse_str("6f1c2d3e-4b5a-4978-8a1b-2c3d4e5f6a7b").unwrap()),
            scenario: "CE".to_string(),
            started_at: at,
            completed_at: at,
            zero_baseline_indicators: vec![],
            analyses: vec![AnalysisSummary::from(&analysis())],
        }
    }

    #[test]
    fn detail_table_has_entity_values_and_category() {
        let table = ReportTable::detail(&analysis());
        assert_eq!(table.name, "geo_ghg_detail");
        assert_eq!(table.columns, vec!["entity", "EU", "LAC", "category", "kind", "magnitude"]);
        assert_eq!(
            table.rows[0],
            vec![
                Cell::from("Agriculture"),
                Cell::Number(3.0),
                Cell::Number(4.0),
                Cell::from("win-win"),
                Cell::from("synergy"),
                Cell::Number(5.0),
            ]
        );
    }

    #[test]
    fn category_table_counts_rows() {
        let table = ReportTable::categories(&analysis());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], Cell::from("tie-lose"));
        assert_eq!(table.rows[1][2], Cell::Count(1));
    }

    #[test]
    fn totals_table_is_named_after_subject() {
        let table = ReportTable::totals(&analysis());
        assert_eq!(table.columns, vec!["group", "GHG"]);
        assert_eq!(table.rows[1], vec![Cell::from("LAC"), Cell::Number(3.0)]);
    }

    #[test]
    fn run_report_collects_three_tables_per_analysis() {
        let report = RunReport::new("ts_results", summary(), &[analysis()]);
        assert_eq!(report.tables.len(), 3);
        assert!(report.table("geo_ghg_totals").is_some());
        assert_eq!(report.file_name(), "ts_results_20250315_6f1c2d3e.json");
    }

    #[test]
    fn cells_serialize_untagged() {
        let row = vec![Cell::from("win"), Cell::Count(2), Cell::Number(1.5)];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"["win",2,1.5]"#);
    }
}
