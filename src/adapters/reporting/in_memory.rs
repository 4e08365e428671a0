//! In-Memory Report Sink
//!
//! Keeps reports in memory. Useful for testing.

use std::sync::Mutex;

use crate::domain::reporting::RunReport;
use crate::ports::{ReportSink, StorageError};

#[derive(Debug, Default)]
pub struct InMemoryReportSink {
    reports: Mutex<Vec<RunReport>>,
}

impl InMemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every report written so far.
    pub fn reports(&self) -> Vec<RunReport> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ReportSink for InMemoryReportSink {
    fn write(&self, report: &RunReport) -> Result<String, StorageError> {
        let mut reports = self
            .reports
            .lock()
            .map_err(|_| StorageError::IoError("report store lock poisoned".to_string()))?;
        reports.push(report.clone());
        Ok(format!("memory://{}", report.file_name()))
    }
}
