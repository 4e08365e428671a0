//! Harmonization Module - Comparable percentage deltas.
//!
//! # Components
//!
//! - `Harmonizer` - Percent change vs. baseline total, with sign flips
//! - `Aggregation` - Optional regrouping of regions into blocs

mod grouping;
mod harmonizer;

pub use grouping::{Aggregation, RegionGroup};
pub use harmonizer::{flip_signs, Harmonizer, NormalizedDelta};
