//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ModelSource` - Input boundary for the MRIO model
//! - `ReportSink` - Output boundary for run reports

mod model_source;
mod report_sink;
mod storage_error;

pub use model_source::ModelSource;
pub use report_sink::ReportSink;
pub use storage_error::StorageError;
