//! IO Model - Input-output matrices and the Leontief solver.
//!
//! # Components
//!
//! - `LabeledMatrix` - Dense matrix with `(region, item)` labels on both axes
//! - `CoefficientMatrix` / `FinalDemandMatrix` - The `A` and `Y` inputs
//! - `SatelliteAccount` - Direct requirements per indicator
//! - `LeontiefSolver` - `(I - A)^-1`, total output and intensities
//! - `ImpactTable` - Entity × indicator footprints and deltas
//! - `MrioModel` - The immutable loaded model

mod footprint;
mod impact_table;
mod leontief;
mod matrix;
mod model;
mod satellite;

pub use footprint::{compute_footprint, FootprintScope};
pub use impact_table::ImpactTable;
pub use leontief::{inverse_diagonal, IntensityTable, LeontiefSolver};
pub use matrix::{CoefficientMatrix, FinalDemandMatrix, LabeledMatrix};
pub use model::MrioModel;
pub use satellite::{CharacterizationFactors, SatelliteAccount};
