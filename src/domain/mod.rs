//! Domain layer containing the numeric and classification logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (axis labels, IDs, outcomes, errors)
//! - `io_model` - Input-output matrices, Leontief solver, footprints
//! - `scenario` - Interventions and the perturbation engine
//! - `harmonization` - Percentage deltas and region aggregation
//! - `analysis` - Trade-off classification along three axes
//! - `reporting` - Tables produced from analysis results

pub mod analysis;
pub mod foundation;
pub mod harmonization;
pub mod io_model;
pub mod reporting;
pub mod scenario;
