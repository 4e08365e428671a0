//! ReportSink port for persisting run reports.

use super::StorageError;
use crate::domain::reporting::RunReport;

/// Receives the report of a completed run.
pub trait ReportSink: Send + Sync {
    /// Persist a report.
    ///
    /// Returns a description of where the report was written.
    fn write(&self, report: &RunReport) -> Result<String, StorageError>;
}
