//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod analysis;

pub use analysis::{RunAnalysisCommand, RunAnalysisError, RunAnalysisHandler, Stage};
