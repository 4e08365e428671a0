//! Report sink adapters.

mod in_memory;
mod json_report_writer;

pub use in_memory::InMemoryReportSink;
pub use json_report_writer::JsonReportWriter;
