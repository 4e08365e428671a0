//! Model source adapters.

mod document;
mod in_memory;
mod json_model_source;

pub use document::{DemandDocument, ModelDocument, SatelliteDocument};
pub use in_memory::InMemoryModelSource;
pub use json_model_source::JsonModelSource;
