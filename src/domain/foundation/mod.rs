//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, axis labels and error types
//! that form the vocabulary of the trade-off analysis domain.

mod axis;
mod errors;
mod ids;
mod outcome;
mod timestamp;

pub use axis::{AxisIndex, AxisKey};
pub(crate) use axis::first_seen;
pub use errors::{AnalysisError, ErrorCode, ValidationError};
pub use ids::RunId;
pub use outcome::Outcome;
pub use timestamp::Timestamp;
