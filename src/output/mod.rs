//! Output module for rendering and exporting crawl results
//!
//! Two tabular sinks over one trait: a console preview of the leading
//! records with a shape line, and a CSV export of the full set.

mod csv;
mod table;
mod traits;

pub use csv::CsvExport;
pub use table::ConsolePreview;
pub use traits::{OutputError, OutputResult, TabularSink};
