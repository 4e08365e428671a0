//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod plan;

pub use handlers::{RunAnalysisCommand, RunAnalysisError, RunAnalysisHandler, Stage};
pub use plan::{AnalysisPlan, CharacterizationPlan, Perspective};
