//! JSON Report Writer - Implementation of ReportSink.
//!
//! Writes each run report as a pretty-printed JSON document in an output
//! directory, named `<prefix>_<YYYYMMDD>_<short run id>.json`.
//!
//! Writes go to `<name>.tmp` first and are renamed into place, so a crash
//! never leaves a truncated report behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::reporting::RunReport;
use crate::ports::{ReportSink, StorageError};

#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    output_dir: PathBuf,
}

impl JsonReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn ensure_output_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            StorageError::IoError(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }
}

impl ReportSink for JsonReportWriter {
    fn write(&self, report: &RunReport) -> Result<String, StorageError> {
        self.ensure_output_dir()?;

        let path = self.output_dir.join(report.file_name());
        let temp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| StorageError::Malformed(format!("Failed to serialize report: {}", e)))?;

        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp, &path)?;

        tracing::info!(
            path = %path.display(),
            tables = report.tables.len(),
            bytes = json.len(),
            "Wrote run report"
        );

        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::RunSummary;
    use crate::domain::foundation::{RunId, Timestamp};
    use tempfile::TempDir;

    fn report() -> RunReport {
        let now = Timestamp::now();
        RunReport::new(
            "ts_results",
            RunSummary {
                run_id: RunId::new(),
                scenario: "CE".to_string(),
                started_at: now,
                completed_at: now,
                zero_baseline_indicators: vec![],
                analyses: vec![],
            },
            &[],
        )
    }

    #[test]
    fn writes_report_under_its_file_name() {
        let dir = TempDir::new().unwrap();
        let writer = JsonReportWriter::new(dir.path().join("out"));
        let report = report();

        let location = writer.write(&report).unwrap();

        let expected = dir.path().join("out").join(report.file_name());
        assert_eq!(location, expected.display().to_string());
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&expected).unwrap()).unwrap();
        assert_eq!(written["summary"]["scenario"], "CE");
        assert!(!expected.with_extension("json.tmp").exists());
    }

    #[test]
    fn unwritable_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let writer = JsonReportWriter::new(blocker.join("out"));
        assert!(matches!(writer.write(&report()), Err(StorageError::IoError(_))));
    }
}
