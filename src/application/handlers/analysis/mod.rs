//! Analysis run handlers.

mod run_analysis;

pub use run_analysis::{RunAnalysisCommand, RunAnalysisError, RunAnalysisHandler, Stage};
