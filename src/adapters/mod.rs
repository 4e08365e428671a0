//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `model` - MRIO model sources (JSON file, in-memory)
//! - `plan` - Analysis plan loading (YAML file)
//! - `reporting` - Report sinks (JSON files, in-memory)

pub mod model;
pub mod plan;
pub mod reporting;

pub use model::{InMemoryModelSource, JsonModelSource};
pub use plan::YamlPlanLoader;
pub use reporting::{InMemoryReportSink, JsonReportWriter};
