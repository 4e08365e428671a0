//! Reporting - Tabular views of analysis results for export.

mod report;

pub use report::{Cell, ReportTable, RunReport};
